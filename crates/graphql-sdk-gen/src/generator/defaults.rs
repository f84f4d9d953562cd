use indexmap::IndexMap;

use crate::generator::{
  annotations::TypeAnnotationMapper,
  ast::{Expr, KeywordArg},
  config::GeneratorConfig,
  errors::{CodegenError, CodegenResult},
  naming::identifiers::field_name,
  resolver::{EmissionPlan, EmissionScope},
  schema::{LiteralNode, SchemaModel, TypeRef, is_builtin_scalar},
};

/// Location of the literal being translated, for error messages.
#[derive(Debug, Clone)]
struct Site<'s> {
  type_name: &'s str,
  path: String,
}

impl Site<'_> {
  fn key(&self, key: &str) -> Self {
    Self {
      type_name: self.type_name,
      path: format!("{}.{key}", self.path),
    }
  }

  fn index(&self, index: usize) -> Self {
    Self {
      type_name: self.type_name,
      path: format!("{}[{index}]", self.path),
    }
  }

  fn error(&self, message: impl Into<String>) -> CodegenError {
    CodegenError::generation(self.type_name, self.path.as_str(), message)
  }

  fn mismatch(&self, literal: &LiteralNode, expected: &TypeRef) -> CodegenError {
    self.error(format!("{} literal cannot be used as a value of type '{expected}'", literal.kind()))
  }
}

/// Translates default literals into expressions, recursing through list and object literals.
pub struct DefaultValueTranslator<'a> {
  schema: &'a SchemaModel,
  config: &'a GeneratorConfig,
  mapper: TypeAnnotationMapper<'a>,
  plan: &'a EmissionPlan,
}

impl<'a> DefaultValueTranslator<'a> {
  #[must_use]
  pub fn new(
    schema: &'a SchemaModel,
    config: &'a GeneratorConfig,
    mapper: TypeAnnotationMapper<'a>,
    plan: &'a EmissionPlan,
  ) -> Self {
    Self {
      schema,
      config,
      mapper,
      plan,
    }
  }

  /// Translates the default of `type_name.field_name`, declared with type `expected`.
  pub fn translate(
    &self,
    literal: &LiteralNode,
    expected: &TypeRef,
    scope: &EmissionScope<'_>,
    type_name: &str,
    field_name: &str,
  ) -> CodegenResult<Expr> {
    let site = Site {
      type_name,
      path: field_name.to_string(),
    };
    self.visit(literal, expected, scope, &site)
  }

  fn visit(
    &self,
    literal: &LiteralNode,
    expected: &TypeRef,
    scope: &EmissionScope<'_>,
    site: &Site,
  ) -> CodegenResult<Expr> {
    if matches!(literal, LiteralNode::Null) {
      return if expected.is_nullable() {
        Ok(Expr::Null)
      } else {
        Err(site.error(format!("null is not allowed for non-null type '{expected}'")))
      };
    }

    match (literal, expected.nullable_inner()) {
      (LiteralNode::List(items), TypeRef::List(element)) => items
        .iter()
        .enumerate()
        .map(|(i, item)| self.visit(item, element, scope, &site.index(i)))
        .collect::<CodegenResult<Vec<_>>>()
        .map(Expr::List),
      (_, TypeRef::List(element)) => Ok(Expr::List(vec![self.visit(literal, element, scope, site)?])),
      (LiteralNode::List(_), _) => Err(site.mismatch(literal, expected)),
      (_, TypeRef::Scalar(name)) => Self::scalar(literal, name, expected, site),
      (LiteralNode::Enum(value), TypeRef::Enum(name)) => {
        if let Some(def) = self.schema.enum_type(name)
          && !def.has_value(value)
        {
          return Err(site.error(format!("'{value}' is not a value of enum '{name}'")));
        }
        Ok(Expr::enum_member(name.as_str(), value.as_str()))
      }
      (LiteralNode::Object(fields), TypeRef::Input(name)) => self.construct(fields, name, scope, site),
      _ => Err(site.mismatch(literal, expected)),
    }
  }

  fn scalar(literal: &LiteralNode, name: &str, expected: &TypeRef, site: &Site) -> CodegenResult<Expr> {
    match (name, literal) {
      ("Int", LiteralNode::Int(value)) => {
        if i32::try_from(*value).is_err() {
          return Err(site.error(format!("{value} does not fit in a 32-bit Int")));
        }
        Ok(Expr::Int(*value))
      }
      ("Float", LiteralNode::Int(value)) => Ok(Expr::Float(*value as f64)),
      ("Float", LiteralNode::Float(value)) => Ok(Expr::Float(*value)),
      ("String", LiteralNode::String(value)) | ("ID", LiteralNode::String(value)) => Ok(Expr::Str(value.clone())),
      ("ID", LiteralNode::Int(value)) => Ok(Expr::Str(value.to_string())),
      ("Boolean", LiteralNode::Boolean(value)) => Ok(Expr::Bool(*value)),
      (builtin, _) if is_builtin_scalar(builtin) => Err(site.mismatch(literal, expected)),
      (_, LiteralNode::Int(value)) => Ok(Expr::Int(*value)),
      (_, LiteralNode::Float(value)) => Ok(Expr::Float(*value)),
      (_, LiteralNode::String(value)) => Ok(Expr::Str(value.clone())),
      (_, LiteralNode::Boolean(value)) => Ok(Expr::Bool(*value)),
      _ => Err(site.mismatch(literal, expected)),
    }
  }

  fn construct(
    &self,
    fields: &IndexMap<String, LiteralNode>,
    name: &str,
    scope: &EmissionScope<'_>,
    site: &Site,
  ) -> CodegenResult<Expr> {
    let def = self
      .schema
      .input_type(name)
      .ok_or_else(|| site.error(format!("input type '{name}' is not declared in the schema")))?;

    if let Some(unknown) = fields.keys().find(|key| def.field(key).is_none()) {
      return Err(site.error(format!("input type '{name}' has no field '{unknown}'")));
    }
    if let Some(missing) = def
      .fields
      .iter()
      .find(|field| field.is_required() && !fields.contains_key(&field.name))
    {
      return Err(site.error(format!(
        "required field '{}' of '{name}' is missing from the object literal",
        missing.name
      )));
    }

    let target_scope = self.plan.scope(name).unwrap_or(*scope);
    let args = fields
      .iter()
      .filter_map(|(key, value)| def.field(key).map(|field| (key, value, field)))
      .map(|(key, value, field)| {
        let value = self.visit(value, &field.type_ref, scope, &site.key(key))?;
        Ok(
          KeywordArg::builder()
            .name(field_name(key, self.config.convert_to_snake_case).0)
            .schema_name(key.as_str())
            .annotation(self.mapper.map(&field.type_ref, &target_scope))
            .value(value)
            .build(),
        )
      })
      .collect::<CodegenResult<Vec<_>>>()?;

    Ok(Expr::Construct {
      class: scope.class_ref(name),
      args,
    })
  }
}
