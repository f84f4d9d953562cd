//! Language-neutral tree describing a generated module.
//!
//! Renderers for each target language consume a [`ModuleTree`]; nothing here knows about Python
//! or Rust syntax.

mod documentation;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

pub use documentation::Documentation;
use strum::Display;

/// Built-in value types every target language has a native spelling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
  Integer,
  Float,
  Text,
  Bool,
}

/// A reference to a generated class.
///
/// `Deferred` names a class that is not declared yet at the point of use (later in the module,
/// or the enclosing class itself).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassRef {
  Direct(String),
  Deferred(String),
}

impl ClassRef {
  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Direct(name) | Self::Deferred(name) => name,
    }
  }

  #[must_use]
  pub fn is_deferred(&self) -> bool {
    matches!(self, Self::Deferred(_))
  }
}

/// A target-side name a custom scalar resolves to, with the import that brings it into scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, bon::Builder)]
pub struct ScalarRef {
  #[builder(into)]
  pub schema_name: String,
  #[builder(into)]
  pub name: String,
  pub import: Option<ImportSpec>,
}

/// A single name imported from a module, `level` being the number of leading dots of a relative import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImportSpec {
  pub module: String,
  pub name: String,
  #[serde(default)]
  pub level: u32,
}

impl ImportSpec {
  pub fn new(module: impl Into<String>, name: impl Into<String>, level: u32) -> Self {
    Self {
      module: module.into(),
      name: name.into(),
      level,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
  Builtin(Primitive),
  Enum(String),
  Scalar(ScalarRef),
  Class(ClassRef),
  Optional(Box<Annotation>),
  List(Box<Annotation>),
}

impl Annotation {
  #[must_use]
  pub fn optional(inner: Annotation) -> Self {
    Self::Optional(Box::new(inner))
  }

  #[must_use]
  pub fn list(inner: Annotation) -> Self {
    Self::List(Box::new(inner))
  }

  #[must_use]
  pub fn is_optional(&self) -> bool {
    matches!(self, Self::Optional(_))
  }

  pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Annotation)) {
    visit(self);
    match self {
      Self::Optional(inner) | Self::List(inner) => inner.walk(visit),
      Self::Builtin(_) | Self::Enum(_) | Self::Scalar(_) | Self::Class(_) => {}
    }
  }
}

/// An expression appearing as a field default.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Int(i64),
  Float(f64),
  Str(String),
  Bool(bool),
  Null,
  Name(String),
  Attribute { value: Box<Expr>, attr: String },
  List(Vec<Expr>),
  Construct { class: ClassRef, args: Vec<KeywordArg> },
}

impl Expr {
  /// `Enum.MEMBER`
  pub fn enum_member(enum_name: impl Into<String>, member: impl Into<String>) -> Self {
    Self::Attribute {
      value: Box::new(Self::Name(enum_name.into())),
      attr: member.into(),
    }
  }

  #[must_use]
  pub fn constructs(&self) -> bool {
    match self {
      Self::Construct { .. } => true,
      Self::List(items) => items.iter().any(Self::constructs),
      Self::Attribute { value, .. } => value.constructs(),
      Self::Int(_) | Self::Float(_) | Self::Str(_) | Self::Bool(_) | Self::Null | Self::Name(_) => false,
    }
  }

  #[must_use]
  pub fn has_deferred_construct(&self) -> bool {
    match self {
      Self::Construct { class, args } => {
        class.is_deferred() || args.iter().any(|arg| arg.value.has_deferred_construct())
      }
      Self::List(items) => items.iter().any(Self::has_deferred_construct),
      Self::Attribute { value, .. } => value.has_deferred_construct(),
      Self::Int(_) | Self::Float(_) | Self::Str(_) | Self::Bool(_) | Self::Null | Self::Name(_) => false,
    }
  }

  /// Every class constructed anywhere inside the expression, outermost first.
  pub fn constructed_classes<'a>(&'a self, out: &mut Vec<&'a ClassRef>) {
    match self {
      Self::Construct { class, args } => {
        out.push(class);
        for arg in args {
          arg.value.constructed_classes(out);
        }
      }
      Self::List(items) => {
        for item in items {
          item.constructed_classes(out);
        }
      }
      Self::Attribute { value, .. } => value.constructed_classes(out),
      Self::Int(_) | Self::Float(_) | Self::Str(_) | Self::Bool(_) | Self::Null | Self::Name(_) => {}
    }
  }
}

/// A named constructor argument.
///
/// `annotation` is the declared annotation of the target field, so renderers can spell the value
/// with the wrappers the field needs.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct KeywordArg {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub schema_name: String,
  pub annotation: Annotation,
  pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct FieldDecl {
  #[builder(into)]
  pub name: String,
  /// Original schema name when it differs from `name`.
  #[builder(into)]
  pub alias: Option<String>,
  #[builder(default)]
  pub docs: Documentation,
  pub annotation: Annotation,
  pub default: Option<Expr>,
}

impl FieldDecl {
  #[must_use]
  pub fn schema_name(&self) -> &str {
    self.alias.as_deref().unwrap_or(&self.name)
  }
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct ClassDecl {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub base: String,
  #[builder(default)]
  pub docs: Documentation,
  #[builder(default)]
  pub fields: Vec<FieldDecl>,
  /// Classes referenced by this declaration that are not declared before it.
  #[builder(default)]
  pub forward_refs: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportDecl {
  pub module: String,
  pub level: u32,
  pub names: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleTree {
  pub imports: Vec<ImportDecl>,
  pub classes: Vec<ClassDecl>,
}

impl ModuleTree {
  #[must_use]
  pub fn class(&self, name: &str) -> Option<&ClassDecl> {
    self.classes.iter().find(|class| class.name == name)
  }
}
