use indexmap::IndexMap;

use crate::generator::{
  errors::CodegenError,
  schema::{EnumTypeDef, InputTypeDef, LiteralNode, SchemaModel, TypeRef},
};

fn parse(sdl: &str) -> SchemaModel {
  SchemaModel::from_sdl(sdl).expect("schema should parse")
}

fn default_of(schema: &SchemaModel, type_name: &str, field: &str) -> LiteralNode {
  schema
    .input_type(type_name)
    .and_then(|def| def.field(field))
    .and_then(|field| field.default_value.clone())
    .expect("field should have a default")
}

#[test]
fn input_types_keep_declaration_order() {
  let schema = parse(
    r"
    type Query { ok: Boolean }
    input Zeta { a: Int }
    enum Color { RED GREEN }
    input Alpha { b: String }
    scalar DateTime
    ",
  );

  let names = schema.input_types().map(|def| def.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["Zeta", "Alpha"]);
  assert_eq!(schema.len(), 2);
  assert!(schema.enum_type("Color").is_some_and(|def| def.has_value("GREEN")));
  assert_eq!(schema.custom_scalars().collect::<Vec<_>>(), ["DateTime"]);
}

#[test]
fn field_types_are_classified() {
  let schema = parse(
    r"
    enum Status { ACTIVE }
    scalar DateTime
    input Other { x: Int }
    input Subject {
      count: Int!
      tags: [String!]
      status: Status
      at: DateTime!
      other: [Other]!
      file: Upload
    }
    ",
  );
  let subject = schema.input_type("Subject").unwrap();
  let types = subject
    .fields
    .iter()
    .map(|field| (field.name.as_str(), field.type_ref.clone()))
    .collect::<Vec<_>>();

  assert_eq!(
    types,
    [
      ("count", TypeRef::non_null(TypeRef::scalar("Int"))),
      ("tags", TypeRef::list(TypeRef::non_null(TypeRef::scalar("String")))),
      ("status", TypeRef::enumeration("Status")),
      ("at", TypeRef::non_null(TypeRef::scalar("DateTime"))),
      ("other", TypeRef::non_null(TypeRef::list(TypeRef::input("Other")))),
      ("file", TypeRef::scalar("Upload")),
    ]
  );
  assert!(subject.field("count").unwrap().is_required());
  assert!(subject.field("tags").unwrap().is_nullable());
  assert!(
    schema.custom_scalars().all(|scalar| scalar != "Upload"),
    "undeclared Upload is not a custom scalar"
  );
}

#[test]
fn type_ref_display_uses_sdl_spelling() {
  let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::input("Filter"))));
  assert_eq!(ty.to_string(), "[Filter!]!");
  assert_eq!(ty.named(), &TypeRef::input("Filter"));
  assert_eq!(ty.input_name(), Some("Filter"));
  assert_eq!(TypeRef::non_null(ty.clone()), ty, "non_null is idempotent");
}

#[test]
fn descriptions_are_kept() {
  let schema = parse(
    r#"
    """
    Filters a search.
    """
    input Filter {
      "Maximum results"
      limit: Int
    }
    "#,
  );
  let filter = schema.input_type("Filter").unwrap();
  assert_eq!(filter.description.as_deref(), Some("Filters a search."));
  assert_eq!(filter.field("limit").unwrap().description.as_deref(), Some("Maximum results"));
}

#[test]
fn default_literals_are_converted() {
  let schema = parse(
    r#"
    enum Sort { ASC DESC }
    input Page { size: Int }
    input Query {
      int: Int = -3
      float: Float = 2.5
      text: String = "hi"
      flag: Boolean = true
      none: Int = null
      sort: Sort = DESC
      ids: [Int] = [1, 2]
      page: Page = { size: 20 }
    }
    "#,
  );

  assert_eq!(default_of(&schema, "Query", "int"), LiteralNode::Int(-3));
  assert_eq!(default_of(&schema, "Query", "float"), LiteralNode::Float(2.5));
  assert_eq!(default_of(&schema, "Query", "text"), LiteralNode::String("hi".to_string()));
  assert_eq!(default_of(&schema, "Query", "flag"), LiteralNode::Boolean(true));
  assert_eq!(default_of(&schema, "Query", "none"), LiteralNode::Null);
  assert_eq!(default_of(&schema, "Query", "sort"), LiteralNode::Enum("DESC".to_string()));
  assert_eq!(
    default_of(&schema, "Query", "ids"),
    LiteralNode::List(vec![LiteralNode::Int(1), LiteralNode::Int(2)])
  );
  assert_eq!(
    default_of(&schema, "Query", "page"),
    LiteralNode::Object(IndexMap::from([("size".to_string(), LiteralNode::Int(20))]))
  );
}

#[test]
fn object_literal_keys_keep_source_order() {
  let schema = parse(
    r"
    input Point { y: Int x: Int }
    input Shape { origin: Point = { x: 1, y: 2 } }
    ",
  );
  let LiteralNode::Object(fields) = default_of(&schema, "Shape", "origin") else {
    panic!("expected object literal");
  };
  assert_eq!(fields.keys().collect::<Vec<_>>(), ["x", "y"]);
}

#[test]
fn extensions_merge_into_their_base_type() {
  let schema = parse(
    r"
    input Filter { limit: Int }
    enum Color { RED }
    extend input Filter { offset: Int }
    extend enum Color { BLUE }
    ",
  );
  let fields = schema
    .input_type("Filter")
    .unwrap()
    .fields
    .iter()
    .map(|field| field.name.as_str())
    .collect::<Vec<_>>();
  assert_eq!(fields, ["limit", "offset"]);
  assert_eq!(schema.enum_type("Color").unwrap().values, ["RED", "BLUE"]);
}

#[test]
fn extension_without_base_is_rejected() {
  let err = SchemaModel::from_sdl("extend input Missing { a: Int }").unwrap_err();
  assert_eq!(err, CodegenError::schema_consistency("Missing", "extend input"));
}

#[test]
fn extension_redeclaring_a_field_is_rejected() {
  let err = SchemaModel::from_sdl("input A { x: Int } extend input A { x: String }").unwrap_err();
  assert!(matches!(err, CodegenError::NameConflict { ref name, .. } if name == "A.x"));
}

#[test]
fn reference_errors_name_the_referencing_field() {
  let cases = [
    ("input A { b: Missing }", "Missing", "A.b"),
    ("type Out { x: Int } input A { out: Out }", "Out", "A.out"),
    ("input A { items: [[Nope!]] }", "Nope", "A.items"),
  ];

  for (sdl, type_name, referenced_by) in cases {
    let err = SchemaModel::from_sdl(sdl).unwrap_err();
    assert_eq!(
      err,
      CodegenError::schema_consistency(type_name, referenced_by),
      "schema: {sdl}"
    );
  }
}

#[test]
fn duplicate_type_names_conflict() {
  let err = SchemaModel::from_sdl("input A { x: Int } enum A { B }").unwrap_err();
  assert!(matches!(err, CodegenError::NameConflict { ref name, .. } if name == "A"));
}

#[test]
fn invalid_sdl_is_a_parse_error() {
  let err = SchemaModel::from_sdl("input A { x: }").unwrap_err();
  assert!(matches!(err, CodegenError::Parse { .. }));
}

#[test]
fn builder_api_matches_parsed_model() {
  let mut built = SchemaModel::new();
  built
    .push_enum(EnumTypeDef::builder().name("Kind").values(vec!["ONE".to_string()]).build())
    .unwrap();
  built
    .push_input_type(
      InputTypeDef::builder()
        .name("Item")
        .fields(vec![
          crate::generator::schema::FieldDef::builder()
            .name("kind")
            .type_ref(TypeRef::non_null(TypeRef::enumeration("Kind")))
            .default_value(LiteralNode::Enum("ONE".to_string()))
            .build(),
        ])
        .build(),
    )
    .unwrap();

  assert_eq!(built, parse("enum Kind { ONE } input Item { kind: Kind! = ONE }"));
}

#[test]
fn pushing_a_taken_name_conflicts() {
  let mut schema = parse("enum Kind { ONE }");
  let err = schema
    .push_input_type(InputTypeDef::builder().name("Kind").build())
    .unwrap_err();
  assert!(matches!(err, CodegenError::NameConflict { .. }));
}
