use std::collections::BTreeMap;

use super::identifiers::is_valid_identifier;
use crate::generator::{
  config::GeneratorConfig,
  errors::{CodegenError, CodegenResult},
  schema::SchemaModel,
};

/// Names already bound in the generated module's scope.
#[derive(Debug, Clone, Default)]
pub struct ReservedNames {
  taken: BTreeMap<String, String>,
}

impl ReservedNames {
  #[must_use]
  pub fn new(schema: &SchemaModel, config: &GeneratorConfig, renderer_names: &[&str]) -> Self {
    let mut reserved = Self::default();
    reserved.reserve(config.base_model_name(), "the base model import");
    reserved.reserve(config.upload_name(), "the upload import");
    for name in renderer_names {
      reserved.reserve(name, format!("'{name}' as used by the rendered module"));
    }
    for def in schema.enums() {
      reserved.reserve(&def.name, format!("enum '{}' imported from '{}'", def.name, config.enums_module));
    }
    for scalar in schema.custom_scalars() {
      let bound = config.scalar_binding(scalar).map_or(scalar, |binding| binding.type_name.as_str());
      reserved.reserve(bound, format!("the type imported for custom scalar '{scalar}'"));
    }
    reserved
  }

  fn reserve(&mut self, name: &str, what: impl Into<String>) {
    self.taken.entry(name.to_string()).or_insert_with(|| what.into());
  }

  /// Claims a class name, failing if it is not an identifier or is already bound.
  pub fn claim_class(&mut self, name: &str) -> CodegenResult<()> {
    if !is_valid_identifier(name) {
      return Err(CodegenError::name_conflict(name, "the identifier rules of generated code"));
    }
    if let Some(what) = self.taken.get(name) {
      return Err(CodegenError::name_conflict(name, what.clone()));
    }
    self.reserve(name, "another generated class");
    Ok(())
  }
}
