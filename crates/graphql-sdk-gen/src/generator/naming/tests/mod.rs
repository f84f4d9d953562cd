use indexmap::IndexMap;

use crate::generator::{
  config::{GeneratorConfig, ScalarBinding},
  errors::CodegenError,
  naming::{
    ReservedNames,
    identifiers::{field_name, is_valid_identifier, to_snake_case, to_variant_name},
  },
  schema::SchemaModel,
};

#[test]
fn test_snake_case() {
  let cases = [
    ("field", "field"),
    ("field1", "field1"),
    ("fieldName", "field_name"),
    ("FieldName", "field_name"),
    ("already_snake", "already_snake"),
    ("HTTPServer", "http_server"),
    ("userID", "user_id"),
    ("value2Name", "value2_name"),
    ("_private", "_private"),
    ("field_Name", "field_name"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_snake_case(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_field_name_alias() {
  assert_eq!(field_name("fieldName", true), ("field_name".to_string(), Some("fieldName".to_string())));
  assert_eq!(field_name("field", true), ("field".to_string(), None));
  assert_eq!(field_name("fieldName", false), ("fieldName".to_string(), None));
}

#[test]
fn test_variant_names() {
  let cases = [("RED", "Red"), ("IN_PROGRESS", "InProgress"), ("ACTIVE", "Active")];
  for (input, expected) in cases {
    assert_eq!(to_variant_name(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_identifier_validity() {
  assert!(is_valid_identifier("CustomInput"));
  assert!(is_valid_identifier("_x1"));
  assert!(!is_valid_identifier("1x"));
  assert!(!is_valid_identifier("with-dash"));
  assert!(!is_valid_identifier(""));
}

fn schema() -> SchemaModel {
  SchemaModel::from_sdl(
    r"
    enum Color { RED }
    scalar DateTime
    scalar Json
    ",
  )
  .unwrap()
}

#[test]
fn reserved_names_cover_imports_enums_and_scalars() {
  let mut config = GeneratorConfig::default();
  config.scalars = IndexMap::from([(
    "Json".to_string(),
    ScalarBinding {
      type_name: "JsonValue".to_string(),
      module: Some("json_types".to_string()),
    },
  )]);
  let reserved = ReservedNames::new(&schema(), &config, &[]);

  for name in ["BaseModel", "Upload", "Color", "DateTime", "JsonValue"] {
    assert!(reserved.clone().claim_class(name).is_err(), "{name} should be reserved");
  }
  assert!(
    reserved.clone().claim_class("Json").is_ok(),
    "bound scalars reserve their target name"
  );
}

#[test]
fn claiming_a_reserved_name_conflicts() {
  let mut reserved = ReservedNames::new(&schema(), &GeneratorConfig::default(), &[]);
  let err = reserved.claim_class("BaseModel").unwrap_err();
  assert!(matches!(err, CodegenError::NameConflict { ref name, .. } if name == "BaseModel"));

  reserved.claim_class("UserInput").unwrap();
  let err = reserved.claim_class("UserInput").unwrap_err();
  assert_eq!(
    err,
    CodegenError::NameConflict {
      name: "UserInput".to_string(),
      conflicts_with: "another generated class".to_string(),
    }
  );
}

#[test]
fn renderer_names_are_reserved() {
  let mut reserved = ReservedNames::new(&schema(), &GeneratorConfig::default(), &["Field", "List"]);
  let err = reserved.claim_class("Field").unwrap_err();
  assert_eq!(
    err,
    CodegenError::NameConflict {
      name: "Field".to_string(),
      conflicts_with: "'Field' as used by the rendered module".to_string(),
    }
  );
  assert!(reserved.claim_class("List").is_err());
  reserved.claim_class("Fields").unwrap();
}
