//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! Source: demos/schema.graphql
//! Generated by `graphql-sdk-gen`

use serde::{Deserialize, Serialize};
use super::base_model::BaseModel;
use super::enums::SortOrder;
use super::scalars::DateTime;
/// Pagination window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    #[serde(default = "PageInput::default_size")]
    pub size: Option<i32>,
    #[serde(default)]
    pub cursor: Option<String>,
}
impl PageInput {
    pub fn default_size() -> Option<i32> {
        Some(20)
    }
}
impl BaseModel for PageInput {}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchInput {
    /// Free text to match.
    #[serde(rename = "queryText")]
    pub query_text: String,
    #[serde(default = "SearchInput::default_page")]
    pub page: Option<PageInput>,
    #[serde(default = "SearchInput::default_order")]
    pub order: Option<SortOrder>,
    #[serde(default = "SearchInput::default_tags")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub since: Option<DateTime>,
    #[serde(default)]
    pub filter: Option<Box<FilterInput>>,
}
impl SearchInput {
    pub fn default_page() -> Option<PageInput> {
        Some(PageInput {
            size: Some(50),
            cursor: None,
        })
    }
    pub fn default_order() -> Option<SortOrder> {
        Some(SortOrder::Desc)
    }
    pub fn default_tags() -> Option<Vec<String>> {
        Some(vec![String::from("featured")])
    }
}
impl BaseModel for SearchInput {}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterInput {
    #[serde(rename = "minScore")]
    #[serde(default = "FilterInput::default_min_score")]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub next: Option<Box<FilterInput>>,
}
impl FilterInput {
    pub fn default_min_score() -> Option<f64> {
        Some(0.5)
    }
}
impl BaseModel for FilterInput {}
