use crate::generator::ast::{Annotation, ClassRef, Expr, KeywordArg, Primitive};

fn construct(class: ClassRef, args: Vec<KeywordArg>) -> Expr {
  Expr::Construct { class, args }
}

fn arg(name: &str, value: Expr) -> KeywordArg {
  KeywordArg::builder()
    .name(name)
    .schema_name(name)
    .annotation(Annotation::Builtin(Primitive::Integer))
    .value(value)
    .build()
}

#[test]
fn walk_visits_wrappers_outermost_first() {
  let annotation = Annotation::optional(Annotation::list(Annotation::optional(Annotation::Class(
    ClassRef::Deferred("Node".to_string()),
  ))));
  let mut optional_layers = 0;
  let mut classes = vec![];
  annotation.walk(&mut |node| match node {
    Annotation::Optional(_) => optional_layers += 1,
    Annotation::Class(class) => classes.push(class.clone()),
    _ => {}
  });
  assert_eq!(optional_layers, 2);
  assert_eq!(classes, [ClassRef::Deferred("Node".to_string())]);
}

#[test]
fn deferred_construct_is_detected_when_nested() {
  let nested = construct(
    ClassRef::Direct("Outer".to_string()),
    vec![arg(
      "inner",
      Expr::List(vec![construct(ClassRef::Deferred("Inner".to_string()), vec![])]),
    )],
  );
  assert!(nested.constructs());
  assert!(nested.has_deferred_construct());

  let direct = construct(ClassRef::Direct("Outer".to_string()), vec![arg("value", Expr::Int(1))]);
  assert!(direct.constructs());
  assert!(!direct.has_deferred_construct());
}

#[test]
fn enum_member_is_not_a_construct() {
  let member = Expr::enum_member("Color", "RED");
  assert!(!member.constructs());
  assert_eq!(
    member,
    Expr::Attribute {
      value: Box::new(Expr::Name("Color".to_string())),
      attr: "RED".to_string(),
    }
  );
}

#[test]
fn constructed_classes_are_listed_outermost_first() {
  let expr = construct(
    ClassRef::Direct("A".to_string()),
    vec![arg("b", construct(ClassRef::Deferred("B".to_string()), vec![]))],
  );
  let mut classes = vec![];
  expr.constructed_classes(&mut classes);
  let names = classes.iter().map(|class| class.name()).collect::<Vec<_>>();
  assert_eq!(names, ["A", "B"]);
}

#[test]
fn primitive_display_is_lowercase() {
  assert_eq!(Primitive::Integer.to_string(), "integer");
  assert_eq!(Primitive::Text.to_string(), "text");
}
