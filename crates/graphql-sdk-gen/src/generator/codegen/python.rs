//! Pydantic model rendering.
//!
//! Deferred class references are written as quoted annotations and every class declared with
//! forward references is rebuilt with `model_rebuild()` once the whole module is defined.

use std::{collections::BTreeSet, fmt::Write};

use itertools::Itertools;

use super::Renderer;
use crate::generator::{
  ast::{Annotation, ClassDecl, ClassRef, Documentation, Expr, FieldDecl, ImportDecl, ModuleTree, Primitive},
  naming::identifiers::PYTHON_KEYWORDS,
};

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonRenderer;

impl Renderer for PythonRenderer {
  fn file_extension(&self) -> &'static str {
    "py"
  }

  fn comment_prefix(&self) -> &'static str {
    "#"
  }

  fn reserved_names(&self) -> &'static [&'static str] {
    &["Optional", "List", "Field"]
  }

  fn render(&self, module: &ModuleTree) -> anyhow::Result<String> {
    if module.classes.is_empty() {
      return Ok(String::new());
    }

    let mut usage = Usage::default();
    let classes = module
      .classes
      .iter()
      .map(|class| render_class(class, &mut usage))
      .collect::<Vec<_>>();

    let mut sections = vec![render_imports(&module.imports, &usage)];
    sections.extend(classes);

    let rebuilds = module
      .classes
      .iter()
      .filter(|class| !class.forward_refs.is_empty())
      .map(|class| format!("{}.model_rebuild()", class.name))
      .join("\n");
    if !rebuilds.is_empty() {
      sections.push(rebuilds);
    }

    Ok(format!("{}\n", sections.join("\n\n\n")))
  }
}

/// Names from `typing` and `pydantic` the rendered classes need.
#[derive(Debug, Default)]
struct Usage {
  typing: BTreeSet<&'static str>,
  field: bool,
}

fn render_imports(imports: &[ImportDecl], usage: &Usage) -> String {
  let mut groups = vec![];

  if !usage.typing.is_empty() {
    groups.push(format!("from typing import {}", usage.typing.iter().join(", ")));
  }

  let mut absolute = imports
    .iter()
    .filter(|import| import.level == 0)
    .map(|import| (import.module.as_str(), import.names.iter().map(String::as_str).collect::<BTreeSet<_>>()))
    .collect::<Vec<_>>();
  if usage.field {
    match absolute.iter_mut().find(|(module, _)| *module == "pydantic") {
      Some((_, names)) => {
        names.insert("Field");
      }
      None => absolute.push(("pydantic", BTreeSet::from(["Field"]))),
    }
  }
  absolute.sort_by(|a, b| a.0.cmp(b.0));
  if !absolute.is_empty() {
    groups.push(
      absolute
        .iter()
        .map(|(module, names)| format!("from {module} import {}", names.iter().join(", ")))
        .join("\n"),
    );
  }

  let relative = imports
    .iter()
    .filter(|import| import.level > 0)
    .map(|import| {
      format!(
        "from {}{} import {}",
        ".".repeat(import.level as usize),
        import.module,
        import.names.iter().join(", ")
      )
    })
    .join("\n");
  if !relative.is_empty() {
    groups.push(relative);
  }

  groups.join("\n\n")
}

fn render_class(class: &ClassDecl, usage: &mut Usage) -> String {
  let mut out = format!("class {}({}):\n", class.name, class.base);

  if !class.docs.is_empty() {
    out.push_str(&docstring(&class.docs));
    if !class.fields.is_empty() {
      out.push('\n');
    }
  }

  for field in &class.fields {
    render_field(field, usage, &mut out);
  }

  if class.docs.is_empty() && class.fields.is_empty() {
    let _ = writeln!(out, "{INDENT}pass");
  }

  out.truncate(out.trim_end().len());
  out
}

fn docstring(docs: &Documentation) -> String {
  match docs.lines() {
    [single] => format!("{INDENT}\"\"\"{}\"\"\"\n", escape_docstring(single)),
    lines => {
      let mut out = format!("{INDENT}\"\"\"\n");
      for line in lines {
        if line.is_empty() {
          out.push('\n');
        } else {
          let _ = writeln!(out, "{INDENT}{}", escape_docstring(line));
        }
      }
      let _ = writeln!(out, "{INDENT}\"\"\"");
      out
    }
  }
}

fn escape_docstring(line: &str) -> String {
  line.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}

enum DefaultValue {
  Value(String),
  Factory(String),
}

fn render_field(field: &FieldDecl, usage: &mut Usage, out: &mut String) {
  for line in field.docs.lines() {
    if line.is_empty() {
      let _ = writeln!(out, "{INDENT}#");
    } else {
      let _ = writeln!(out, "{INDENT}# {line}");
    }
  }

  let (name, alias) = python_field_name(field);
  let annotation = annotation(&field.annotation, usage);

  let default = match &field.default {
    Some(expr) if expr.constructs() => Some(DefaultValue::Factory(expression(expr))),
    Some(expr) => Some(DefaultValue::Value(expression(expr))),
    None if field.annotation.is_optional() => Some(DefaultValue::Value("None".to_string())),
    None => None,
  };

  let _ = match (alias, default) {
    (None, None) => writeln!(out, "{INDENT}{name}: {annotation}"),
    (None, Some(DefaultValue::Value(value))) => writeln!(out, "{INDENT}{name}: {annotation} = {value}"),
    (alias, default) => {
      usage.field = true;
      let mut args = vec![];
      if let Some(alias) = alias {
        args.push(format!("alias={}", string_literal(&alias)));
      }
      match default {
        Some(DefaultValue::Value(value)) => args.push(format!("default={value}")),
        Some(DefaultValue::Factory(value)) => args.push(format!("default_factory=lambda: {value}")),
        None => {}
      }
      writeln!(out, "{INDENT}{name}: {annotation} = Field({})", args.join(", "))
    }
  };
}

/// Field name to emit and the alias it needs: keywords get a trailing underscore and keep their
/// schema name as alias.
fn python_field_name(field: &FieldDecl) -> (String, Option<String>) {
  if PYTHON_KEYWORDS.contains(field.name.as_str()) {
    (format!("{}_", field.name), Some(field.schema_name().to_string()))
  } else {
    (field.name.clone(), field.alias.clone())
  }
}

fn keyword_name(name: &str) -> String {
  if PYTHON_KEYWORDS.contains(name) {
    format!("{name}_")
  } else {
    name.to_string()
  }
}

fn annotation(annotation: &Annotation, usage: &mut Usage) -> String {
  match annotation {
    Annotation::Builtin(primitive) => primitive_name(*primitive).to_string(),
    Annotation::Enum(name) => name.clone(),
    Annotation::Scalar(scalar) => scalar.name.clone(),
    Annotation::Class(ClassRef::Direct(name)) => name.clone(),
    Annotation::Class(ClassRef::Deferred(name)) => format!("\"{name}\""),
    Annotation::Optional(inner) => {
      usage.typing.insert("Optional");
      format!("Optional[{}]", self::annotation(inner, usage))
    }
    Annotation::List(inner) => {
      usage.typing.insert("List");
      format!("List[{}]", self::annotation(inner, usage))
    }
  }
}

fn primitive_name(primitive: Primitive) -> &'static str {
  match primitive {
    Primitive::Integer => "int",
    Primitive::Float => "float",
    Primitive::Text => "str",
    Primitive::Bool => "bool",
  }
}

fn expression(expr: &Expr) -> String {
  match expr {
    Expr::Int(value) => value.to_string(),
    Expr::Float(value) => float_literal(*value),
    Expr::Str(value) => string_literal(value),
    Expr::Bool(true) => "True".to_string(),
    Expr::Bool(false) => "False".to_string(),
    Expr::Null => "None".to_string(),
    Expr::Name(name) => name.clone(),
    Expr::Attribute { value, attr } => format!("{}.{attr}", expression(value)),
    Expr::List(items) => format!("[{}]", items.iter().map(expression).join(", ")),
    Expr::Construct { class, args } => format!(
      "{}({})",
      class.name(),
      args
        .iter()
        .map(|arg| format!("{}={}", keyword_name(&arg.name), expression(&arg.value)))
        .join(", ")
    ),
  }
}

fn float_literal(value: f64) -> String {
  let text = format!("{value:?}");
  if text.contains(['.', 'e', 'E']) || !value.is_finite() {
    text
  } else {
    format!("{text}.0")
  }
}

pub(crate) fn string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if c.is_control() => {
        let _ = write!(out, "\\x{:02x}", u32::from(c));
      }
      c => out.push(c),
    }
  }
  out.push('"');
  out
}
