//! Read-only object model of the parts of a GraphQL schema the generator consumes.
//!
//! Input objects keep their declaration order: the emission order of generated classes
//! starts from it. Enums and custom scalars are only recorded so that type references can be
//! classified and literals validated.

mod ingest;

#[cfg(test)]
mod tests;

use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};

use crate::generator::errors::{CodegenError, CodegenResult};

pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];
pub const UPLOAD_SCALAR: &str = "Upload";

#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
  BUILTIN_SCALARS.contains(&name)
}

/// A reference to a schema type as written on an input field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
  Scalar(String),
  Enum(String),
  Input(String),
  List(Box<TypeRef>),
  /// Never wraps another `NonNull`; use [`TypeRef::non_null`] to construct.
  NonNull(Box<TypeRef>),
}

impl TypeRef {
  pub fn scalar(name: impl Into<String>) -> Self {
    Self::Scalar(name.into())
  }

  pub fn enumeration(name: impl Into<String>) -> Self {
    Self::Enum(name.into())
  }

  pub fn input(name: impl Into<String>) -> Self {
    Self::Input(name.into())
  }

  #[must_use]
  pub fn list(inner: TypeRef) -> Self {
    Self::List(Box::new(inner))
  }

  #[must_use]
  pub fn non_null(inner: TypeRef) -> Self {
    match inner {
      already @ Self::NonNull(_) => already,
      other => Self::NonNull(Box::new(other)),
    }
  }

  #[must_use]
  pub fn is_nullable(&self) -> bool {
    !matches!(self, Self::NonNull(_))
  }

  /// Strips a single outer `NonNull`, if any.
  #[must_use]
  pub fn nullable_inner(&self) -> &TypeRef {
    match self {
      Self::NonNull(inner) => inner,
      other => other,
    }
  }

  /// The named type at the bottom of every list and non-null wrapper.
  #[must_use]
  pub fn named(&self) -> &TypeRef {
    match self {
      Self::List(inner) | Self::NonNull(inner) => inner.named(),
      named => named,
    }
  }

  #[must_use]
  pub fn input_name(&self) -> Option<&str> {
    match self.named() {
      Self::Input(name) => Some(name),
      _ => None,
    }
  }
}

impl Display for TypeRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Scalar(name) | Self::Enum(name) | Self::Input(name) => f.write_str(name),
      Self::List(inner) => write!(f, "[{inner}]"),
      Self::NonNull(inner) => write!(f, "{inner}!"),
    }
  }
}

/// A constant literal attached to an input field as its default value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
  Int(i64),
  Float(f64),
  String(String),
  Boolean(bool),
  Null,
  Enum(String),
  List(Vec<LiteralNode>),
  /// Keys keep the literal's own order; absent fields fall back to the target type's defaults.
  Object(IndexMap<String, LiteralNode>),
}

impl LiteralNode {
  #[must_use]
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Int(_) => "int",
      Self::Float(_) => "float",
      Self::String(_) => "string",
      Self::Boolean(_) => "boolean",
      Self::Null => "null",
      Self::Enum(_) => "enum value",
      Self::List(_) => "list",
      Self::Object(_) => "object",
    }
  }
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct FieldDef {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub description: Option<String>,
  pub type_ref: TypeRef,
  pub default_value: Option<LiteralNode>,
}

impl FieldDef {
  #[must_use]
  pub fn is_nullable(&self) -> bool {
    self.type_ref.is_nullable()
  }

  /// A field that must be supplied when the type is constructed.
  #[must_use]
  pub fn is_required(&self) -> bool {
    !self.is_nullable() && self.default_value.is_none()
  }
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct InputTypeDef {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub description: Option<String>,
  #[builder(default)]
  pub fields: Vec<FieldDef>,
}

impl InputTypeDef {
  #[must_use]
  pub fn field(&self, name: &str) -> Option<&FieldDef> {
    self.fields.iter().find(|field| field.name == name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct EnumTypeDef {
  #[builder(into)]
  pub name: String,
  #[builder(default)]
  pub values: Vec<String>,
}

impl EnumTypeDef {
  #[must_use]
  pub fn has_value(&self, value: &str) -> bool {
    self.values.iter().any(|v| v == value)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaModel {
  input_types: IndexMap<String, InputTypeDef>,
  enums: IndexMap<String, EnumTypeDef>,
  scalars: IndexSet<String>,
}

impl SchemaModel {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_input_type(&mut self, def: InputTypeDef) -> CodegenResult<()> {
    self.ensure_unclaimed(&def.name)?;
    self.input_types.insert(def.name.clone(), def);
    Ok(())
  }

  pub fn push_enum(&mut self, def: EnumTypeDef) -> CodegenResult<()> {
    self.ensure_unclaimed(&def.name)?;
    self.enums.insert(def.name.clone(), def);
    Ok(())
  }

  pub fn push_scalar(&mut self, name: impl Into<String>) -> CodegenResult<()> {
    let name = name.into();
    if is_builtin_scalar(&name) {
      return Ok(());
    }
    self.ensure_unclaimed(&name)?;
    self.scalars.insert(name);
    Ok(())
  }

  /// Input types in schema declaration order.
  pub fn input_types(&self) -> impl Iterator<Item = &InputTypeDef> {
    self.input_types.values()
  }

  #[must_use]
  pub fn input_type(&self, name: &str) -> Option<&InputTypeDef> {
    self.input_types.get(name)
  }

  pub(crate) fn input_type_mut(&mut self, name: &str) -> Option<&mut InputTypeDef> {
    self.input_types.get_mut(name)
  }

  #[must_use]
  pub fn enum_type(&self, name: &str) -> Option<&EnumTypeDef> {
    self.enums.get(name)
  }

  pub(crate) fn enum_type_mut(&mut self, name: &str) -> Option<&mut EnumTypeDef> {
    self.enums.get_mut(name)
  }

  pub fn enums(&self) -> impl Iterator<Item = &EnumTypeDef> {
    self.enums.values()
  }

  pub fn custom_scalars(&self) -> impl Iterator<Item = &str> {
    self.scalars.iter().map(String::as_str)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.input_types.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.input_types.is_empty()
  }

  fn ensure_unclaimed(&self, name: &str) -> CodegenResult<()> {
    if self.input_types.contains_key(name) || self.enums.contains_key(name) || self.scalars.contains(name) {
      return Err(CodegenError::name_conflict(name, "another type declared in the schema"));
    }
    Ok(())
  }
}
