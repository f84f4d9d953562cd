pub mod python;
pub mod rust;
mod uses;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::generator::ast::ModuleTree;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Deserialize, Serialize, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
  /// Pydantic models
  #[default]
  Python,
  /// Serde structs
  Rust,
}

impl TargetLanguage {
  #[must_use]
  pub fn renderer(self) -> Box<dyn Renderer> {
    match self {
      Self::Python => Box::new(python::PythonRenderer),
      Self::Rust => Box::new(rust::RustRenderer),
    }
  }
}

/// Turns a [`ModuleTree`] into source text of one target language.
pub trait Renderer {
  fn file_extension(&self) -> &'static str;

  /// Line comment prefix used for the generated-file header.
  fn comment_prefix(&self) -> &'static str;

  /// Names the rendered module binds on its own, which generated classes must not shadow.
  fn reserved_names(&self) -> &'static [&'static str];

  fn render(&self, module: &ModuleTree) -> anyhow::Result<String>;

  fn header(&self, source_path: &str) -> String {
    let prefix = self.comment_prefix();
    format!(
      "{prefix} AUTO-GENERATED CODE - DO NOT EDIT!\n{prefix}\n{prefix} Source: {source_path}\n{prefix} Generated by \
       `graphql-sdk-gen`\n\n"
    )
  }
}
