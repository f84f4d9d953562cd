use std::collections::HashMap;

use async_graphql_parser::{
  Positioned,
  types::{BaseType, InputValueDefinition, ServiceDocument, Type, TypeDefinition, TypeKind, TypeSystemDefinition},
};
use async_graphql_value::ConstValue;
use indexmap::IndexMap;

use super::{EnumTypeDef, FieldDef, InputTypeDef, LiteralNode, SchemaModel, TypeRef, UPLOAD_SCALAR, is_builtin_scalar};
use crate::generator::errors::{CodegenError, CodegenResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredKind {
  Scalar,
  Enum,
  Input,
  Output,
}

impl DeclaredKind {
  fn of(kind: &TypeKind) -> Self {
    match kind {
      TypeKind::Scalar => Self::Scalar,
      TypeKind::Enum(_) => Self::Enum,
      TypeKind::InputObject(_) => Self::Input,
      TypeKind::Object(_) | TypeKind::Interface(_) | TypeKind::Union(_) => Self::Output,
    }
  }
}

impl SchemaModel {
  /// Parses GraphQL SDL and collects input objects, enums and custom scalars.
  pub fn from_sdl(sdl: &str) -> CodegenResult<Self> {
    let document = async_graphql_parser::parse_schema(sdl).map_err(|e| CodegenError::Parse { message: e.to_string() })?;
    Self::from_document(&document)
  }

  pub fn from_document(document: &ServiceDocument) -> CodegenResult<Self> {
    let definitions = document
      .definitions
      .iter()
      .filter_map(|definition| match definition {
        TypeSystemDefinition::Type(def) => Some(&def.node),
        TypeSystemDefinition::Schema(_) | TypeSystemDefinition::Directive(_) => None,
      })
      .collect::<Vec<_>>();

    let kinds = collect_kinds(&definitions)?;
    let mut model = SchemaModel::new();

    for def in definitions.iter().filter(|def| !def.extend) {
      match &def.kind {
        TypeKind::Scalar => model.push_scalar(def.name.node.as_str())?,
        TypeKind::Enum(enum_type) => model.push_enum(
          EnumTypeDef::builder()
            .name(def.name.node.as_str())
            .values(enum_type.values.iter().map(|v| v.node.value.node.to_string()).collect())
            .build(),
        )?,
        TypeKind::InputObject(input) => {
          let fields = convert_fields(def.name.node.as_str(), &input.fields, &kinds)?;
          model.push_input_type(
            InputTypeDef::builder()
              .name(def.name.node.as_str())
              .maybe_description(description_of(def))
              .fields(fields)
              .build(),
          )?;
        }
        TypeKind::Object(_) | TypeKind::Interface(_) | TypeKind::Union(_) => {}
      }
    }

    for def in definitions.iter().filter(|def| def.extend) {
      merge_extension(&mut model, def, &kinds)?;
    }

    Ok(model)
  }
}

fn description_of(def: &TypeDefinition) -> Option<String> {
  def.description.as_ref().map(|d| d.node.clone())
}

fn collect_kinds(definitions: &[&TypeDefinition]) -> CodegenResult<HashMap<String, DeclaredKind>> {
  let mut kinds = HashMap::new();
  for def in definitions.iter().filter(|def| !def.extend) {
    let name = def.name.node.to_string();
    if is_builtin_scalar(&name) {
      continue;
    }
    if kinds.insert(name.clone(), DeclaredKind::of(&def.kind)).is_some() {
      return Err(CodegenError::name_conflict(name, "another type declared in the schema"));
    }
  }
  Ok(kinds)
}

fn merge_extension(
  model: &mut SchemaModel,
  def: &TypeDefinition,
  kinds: &HashMap<String, DeclaredKind>,
) -> CodegenResult<()> {
  let name = def.name.node.as_str();
  match &def.kind {
    TypeKind::InputObject(input) => {
      let fields = convert_fields(name, &input.fields, kinds)?;
      let target = model
        .input_type_mut(name)
        .ok_or_else(|| CodegenError::schema_consistency(name, "extend input"))?;
      for field in fields {
        if target.field(&field.name).is_some() {
          return Err(CodegenError::name_conflict(
            format!("{name}.{}", field.name),
            "a field already declared on the input type",
          ));
        }
        target.fields.push(field);
      }
    }
    TypeKind::Enum(enum_type) => {
      let target = model
        .enum_type_mut(name)
        .ok_or_else(|| CodegenError::schema_consistency(name, "extend enum"))?;
      target
        .values
        .extend(enum_type.values.iter().map(|v| v.node.value.node.to_string()));
    }
    TypeKind::Scalar | TypeKind::Object(_) | TypeKind::Interface(_) | TypeKind::Union(_) => {}
  }
  Ok(())
}

fn convert_fields(
  owner: &str,
  fields: &[Positioned<InputValueDefinition>],
  kinds: &HashMap<String, DeclaredKind>,
) -> CodegenResult<Vec<FieldDef>> {
  fields
    .iter()
    .map(|field| {
      let field = &field.node;
      let field_name = field.name.node.as_str();
      let referenced_by = format!("{owner}.{field_name}");
      let type_ref = convert_type(&field.ty.node, kinds, &referenced_by)?;
      let default_value = field
        .default_value
        .as_ref()
        .map(|value| convert_literal(&value.node, owner, field_name))
        .transpose()?;

      Ok(
        FieldDef::builder()
          .name(field_name)
          .maybe_description(field.description.as_ref().map(|d| d.node.clone()))
          .type_ref(type_ref)
          .maybe_default_value(default_value)
          .build(),
      )
    })
    .collect()
}

fn convert_type(ty: &Type, kinds: &HashMap<String, DeclaredKind>, referenced_by: &str) -> CodegenResult<TypeRef> {
  let base = match &ty.base {
    BaseType::Named(name) => classify(name.as_str(), kinds, referenced_by)?,
    BaseType::List(inner) => TypeRef::list(convert_type(inner, kinds, referenced_by)?),
  };
  Ok(if ty.nullable { base } else { TypeRef::non_null(base) })
}

fn classify(name: &str, kinds: &HashMap<String, DeclaredKind>, referenced_by: &str) -> CodegenResult<TypeRef> {
  if is_builtin_scalar(name) {
    return Ok(TypeRef::scalar(name));
  }
  match kinds.get(name) {
    Some(DeclaredKind::Scalar) => Ok(TypeRef::scalar(name)),
    Some(DeclaredKind::Enum) => Ok(TypeRef::enumeration(name)),
    Some(DeclaredKind::Input) => Ok(TypeRef::input(name)),
    None if name == UPLOAD_SCALAR => Ok(TypeRef::scalar(name)),
    Some(DeclaredKind::Output) | None => Err(CodegenError::schema_consistency(name, referenced_by)),
  }
}

fn convert_literal(value: &ConstValue, owner: &str, field: &str) -> CodegenResult<LiteralNode> {
  Ok(match value {
    ConstValue::Null => LiteralNode::Null,
    ConstValue::Boolean(b) => LiteralNode::Boolean(*b),
    ConstValue::String(s) => LiteralNode::String(s.clone()),
    ConstValue::Enum(name) => LiteralNode::Enum(name.to_string()),
    ConstValue::Number(number) => {
      if number.is_f64() {
        LiteralNode::Float(number.as_f64().unwrap_or_default())
      } else if let Some(int) = number.as_i64() {
        LiteralNode::Int(int)
      } else {
        return Err(CodegenError::generation(
          owner,
          field,
          format!("integer literal {number} is out of range"),
        ));
      }
    }
    ConstValue::List(items) => LiteralNode::List(
      items
        .iter()
        .map(|item| convert_literal(item, owner, field))
        .collect::<CodegenResult<_>>()?,
    ),
    ConstValue::Object(fields) => LiteralNode::Object(
      fields
        .iter()
        .map(|(key, value)| Ok((key.to_string(), convert_literal(value, owner, field)?)))
        .collect::<CodegenResult<IndexMap<_, _>>>()?,
    ),
    ConstValue::Binary(_) => {
      return Err(CodegenError::generation(
        owner,
        field,
        "binary literals have no default value representation",
      ));
    }
  })
}
