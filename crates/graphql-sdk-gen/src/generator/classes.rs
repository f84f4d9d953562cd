use std::collections::HashMap;

use crate::generator::{
  annotations::TypeAnnotationMapper,
  ast::{ClassDecl, Documentation, FieldDecl},
  config::GeneratorConfig,
  defaults::DefaultValueTranslator,
  errors::{CodegenError, CodegenResult},
  naming::{
    ReservedNames,
    identifiers::{field_name, is_valid_identifier},
  },
  resolver::EmissionScope,
  schema::InputTypeDef,
};

/// Builds one class declaration per input type, fields in declaration order.
pub struct ClassDefBuilder<'a> {
  config: &'a GeneratorConfig,
  mapper: TypeAnnotationMapper<'a>,
  translator: &'a DefaultValueTranslator<'a>,
}

impl<'a> ClassDefBuilder<'a> {
  #[must_use]
  pub fn new(
    config: &'a GeneratorConfig,
    mapper: TypeAnnotationMapper<'a>,
    translator: &'a DefaultValueTranslator<'a>,
  ) -> Self {
    Self {
      config,
      mapper,
      translator,
    }
  }

  pub fn build(
    &self,
    def: &InputTypeDef,
    scope: &EmissionScope<'_>,
    reserved: &mut ReservedNames,
  ) -> CodegenResult<ClassDecl> {
    reserved.claim_class(&def.name)?;

    let mut claimed = HashMap::<String, &str>::new();
    let mut fields = Vec::with_capacity(def.fields.len());

    for field in &def.fields {
      let (name, alias) = field_name(&field.name, self.config.convert_to_snake_case);
      if !is_valid_identifier(&name) {
        return Err(CodegenError::name_conflict(
          format!("{}.{name}", def.name),
          "the identifier rules of generated code",
        ));
      }
      if let Some(previous) = claimed.insert(name.clone(), field.name.as_str()) {
        return Err(CodegenError::name_conflict(
          format!("{}.{name}", def.name),
          format!("the generated name of field '{previous}'"),
        ));
      }

      let default = field
        .default_value
        .as_ref()
        .map(|literal| {
          self
            .translator
            .translate(literal, &field.type_ref, scope, &def.name, &field.name)
        })
        .transpose()?;

      fields.push(
        FieldDecl::builder()
          .name(name)
          .maybe_alias(alias)
          .docs(Documentation::from_optional(field.description.as_ref()))
          .annotation(self.mapper.map(&field.type_ref, scope))
          .maybe_default(default)
          .build(),
      );
    }

    Ok(
      ClassDecl::builder()
        .name(def.name.as_str())
        .base(self.config.base_model_name())
        .docs(Documentation::from_optional(def.description.as_ref()))
        .fields(fields)
        .forward_refs(scope.forward_refs().clone())
        .build(),
    )
  }
}
