use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::generator::ast::ImportSpec;

/// Where a type is emitted relative to the types its default literals construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Display, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EmissionOrder {
  /// A type comes first, followed immediately by the types its defaults construct.
  #[default]
  ReferrerFirst,
  /// Constructed types come before the type whose defaults construct them.
  DependencyFirst,
}

/// Target-side type bound to a custom scalar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarBinding {
  pub type_name: String,
  /// Module to import `type_name` from; `None` means the name needs no import.
  #[serde(default)]
  pub module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
  pub enums_module: String,
  pub scalars_module_name: String,
  pub base_model_import: ImportSpec,
  pub upload_import: ImportSpec,
  pub convert_to_snake_case: bool,
  pub emission_order: EmissionOrder,
  pub scalars: IndexMap<String, ScalarBinding>,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      enums_module: "enums".to_string(),
      scalars_module_name: "scalars".to_string(),
      base_model_import: ImportSpec::new("base_model", "BaseModel", 1),
      upload_import: ImportSpec::new("base_model", "Upload", 1),
      convert_to_snake_case: true,
      emission_order: EmissionOrder::default(),
      scalars: IndexMap::new(),
    }
  }
}

impl GeneratorConfig {
  /// Parses a JSON config; errors name the offending path, e.g. `scalars.DateTime.type_name`.
  pub fn from_json_slice(bytes: &[u8]) -> anyhow::Result<Self> {
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(deserializer)
      .map_err(|e| anyhow::anyhow!("invalid generator config at '{}': {}", e.path(), e.inner()))
  }

  #[must_use]
  pub fn base_model_name(&self) -> &str {
    &self.base_model_import.name
  }

  #[must_use]
  pub fn upload_name(&self) -> &str {
    &self.upload_import.name
  }

  #[must_use]
  pub fn scalar_binding(&self, schema_name: &str) -> Option<&ScalarBinding> {
    self.scalars.get(schema_name)
  }
}
