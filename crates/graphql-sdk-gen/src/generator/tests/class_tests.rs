use std::collections::BTreeSet;

use super::{generate, generate_with};
use crate::generator::{
  ast::{Annotation, ClassRef, Documentation, ImportSpec, Primitive},
  codegen::TargetLanguage,
  config::{GeneratorConfig, ScalarBinding},
  errors::CodegenError,
  orchestrator::Orchestrator,
};

fn conflict(result: Result<impl std::fmt::Debug, CodegenError>) -> (String, String) {
  match result.expect_err("generation should fail") {
    CodegenError::NameConflict { name, conflicts_with } => (name, conflicts_with),
    other => panic!("expected a name conflict, got {other:?}"),
  }
}

#[test]
fn fields_keep_declaration_order_and_gain_aliases() {
  let output = generate(
    r#"
    "A search"
    input Search {
      "Text to match"
      queryText: String!
      maxResults: Int
      plain: Boolean
    }
    "#,
  )
  .unwrap();
  let class = output.module.class("Search").unwrap();

  assert_eq!(class.base, "BaseModel");
  assert_eq!(class.docs, Documentation::from_lines(["A search"]));
  let names = class
    .fields
    .iter()
    .map(|field| (field.name.as_str(), field.alias.as_deref()))
    .collect::<Vec<_>>();
  assert_eq!(
    names,
    [
      ("query_text", Some("queryText")),
      ("max_results", Some("maxResults")),
      ("plain", None),
    ]
  );
  assert_eq!(class.fields[0].docs, Documentation::from_lines(["Text to match"]));
  assert_eq!(class.fields[0].annotation, Annotation::Builtin(Primitive::Text));
  assert!(class.fields[1].default.is_none());
}

#[test]
fn snake_case_conversion_can_be_disabled() {
  let config = GeneratorConfig {
    convert_to_snake_case: false,
    ..GeneratorConfig::default()
  };
  let output = generate_with("input Search { queryText: String }", config).unwrap();
  let field = &output.module.class("Search").unwrap().fields[0];
  assert_eq!(field.name, "queryText");
  assert_eq!(field.alias, None);
}

#[test]
fn base_model_name_comes_from_config() {
  let config = GeneratorConfig {
    base_model_import: ImportSpec::new("models.base", "Model", 0),
    ..GeneratorConfig::default()
  };
  let output = generate_with("input A { x: Int }", config).unwrap();
  assert_eq!(output.module.class("A").unwrap().base, "Model");
}

#[test]
fn forward_refs_are_recorded_on_the_class() {
  let output = generate("input A { b: B c: C } input B { x: Int } input C { a: A }").unwrap();
  assert_eq!(
    output.module.class("A").unwrap().forward_refs,
    BTreeSet::from(["B".to_string(), "C".to_string()])
  );
  assert!(output.module.class("B").unwrap().forward_refs.is_empty());
  assert!(output.module.class("C").unwrap().forward_refs.is_empty());
  assert_eq!(
    output.module.class("C").unwrap().fields[0].annotation,
    Annotation::optional(Annotation::Class(ClassRef::Direct("A".to_string())))
  );
}

#[test]
fn colliding_field_names_conflict() {
  let (name, with) = conflict(generate("input A { fooBar: Int foo_bar: Int }"));
  assert_eq!(name, "A.foo_bar");
  assert_eq!(with, "the generated name of field 'fooBar'");
}

#[test]
fn class_names_cannot_shadow_imports() {
  let (name, with) = conflict(generate("input BaseModel { x: Int }"));
  assert_eq!(name, "BaseModel");
  assert_eq!(with, "the base model import");

  let (name, with) = conflict(generate("input Upload { x: Int }"));
  assert_eq!(name, "Upload");
  assert_eq!(with, "the upload import");

  let mut config = GeneratorConfig::default();
  config.scalars.insert(
    "DateTime".to_string(),
    ScalarBinding {
      type_name: "Timestamp".to_string(),
      module: Some("datetime".to_string()),
    },
  );
  let (name, with) = conflict(generate_with("scalar DateTime input Timestamp { at: DateTime }", config));
  assert_eq!(name, "Timestamp");
  assert_eq!(with, "the type imported for custom scalar 'DateTime'");
}

#[test]
fn class_names_cannot_shadow_names_the_python_module_imports() {
  for name in ["Field", "List", "Optional"] {
    let sdl = format!("input {name} {{ x: [Int] = [1] }} input Holder {{ a: {name} = {{ x: [2] }} }}");
    let (conflicting, with) = conflict(generate(&sdl));
    assert_eq!(conflicting, name);
    assert_eq!(with, format!("'{name}' as used by the rendered module"));
  }
}

#[test]
fn reserved_names_depend_on_the_target() {
  let sdl = "input Option { x: Int } input Field { y: Int }";
  let orchestrator = Orchestrator::from_sdl(sdl, GeneratorConfig::default()).unwrap();

  let (name, _) = conflict(orchestrator.generate(TargetLanguage::Rust));
  assert_eq!(name, "Option");

  let (name, _) = conflict(orchestrator.generate(TargetLanguage::Python));
  assert_eq!(name, "Field");

  let rust_ok = Orchestrator::from_sdl("input Field { y: Int }", GeneratorConfig::default())
    .unwrap()
    .generate(TargetLanguage::Rust);
  assert!(rust_ok.is_ok(), "Field is only reserved for Python");
}
