use crate::generator::{
  ast::{Annotation, ImportSpec, Primitive, ScalarRef},
  config::GeneratorConfig,
  resolver::EmissionScope,
  schema::{TypeRef, UPLOAD_SCALAR},
};

/// Maps schema type references to target annotations.
///
/// Everything not wrapped in `NonNull` is optional; list elements get their own optionality.
#[derive(Debug, Clone, Copy)]
pub struct TypeAnnotationMapper<'a> {
  config: &'a GeneratorConfig,
}

impl<'a> TypeAnnotationMapper<'a> {
  #[must_use]
  pub fn new(config: &'a GeneratorConfig) -> Self {
    Self { config }
  }

  #[must_use]
  pub fn map(&self, type_ref: &TypeRef, scope: &EmissionScope<'_>) -> Annotation {
    match type_ref {
      TypeRef::NonNull(inner) => self.map_required(inner, scope),
      nullable => Annotation::optional(self.map_required(nullable, scope)),
    }
  }

  fn map_required(&self, type_ref: &TypeRef, scope: &EmissionScope<'_>) -> Annotation {
    match type_ref {
      TypeRef::NonNull(inner) => self.map_required(inner, scope),
      TypeRef::List(inner) => Annotation::list(self.map(inner, scope)),
      TypeRef::Scalar(name) => self.map_scalar(name),
      TypeRef::Enum(name) => Annotation::Enum(name.clone()),
      TypeRef::Input(name) => Annotation::Class(scope.class_ref(name)),
    }
  }

  #[must_use]
  pub fn map_scalar(&self, name: &str) -> Annotation {
    match name {
      "Int" => Annotation::Builtin(Primitive::Integer),
      "Float" => Annotation::Builtin(Primitive::Float),
      "String" | "ID" => Annotation::Builtin(Primitive::Text),
      "Boolean" => Annotation::Builtin(Primitive::Bool),
      UPLOAD_SCALAR => Annotation::Scalar(
        ScalarRef::builder()
          .schema_name(name)
          .name(self.config.upload_name())
          .import(self.config.upload_import.clone())
          .build(),
      ),
      custom => Annotation::Scalar(self.custom_scalar(custom)),
    }
  }

  fn custom_scalar(&self, name: &str) -> ScalarRef {
    match self.config.scalar_binding(name) {
      Some(binding) => ScalarRef::builder()
        .schema_name(name)
        .name(binding.type_name.as_str())
        .maybe_import(
          binding
            .module
            .as_ref()
            .map(|module| ImportSpec::new(module.as_str(), binding.type_name.as_str(), 0)),
        )
        .build(),
      None => ScalarRef::builder()
        .schema_name(name)
        .name(name)
        .import(ImportSpec::new(self.config.scalars_module_name.as_str(), name, 1))
        .build(),
    }
  }
}
