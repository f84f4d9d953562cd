use std::{collections::HashSet, sync::LazyLock};

use inflections::Inflect;
use regex::Regex;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub(crate) static PYTHON_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
  ]
  .into_iter()
  .collect()
});

pub(crate) static RUST_KEYWORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen", "self", "Self",
  ]
  .into_iter()
  .collect()
});

/// Keywords that cannot be written as raw identifiers.
pub(crate) const RUST_NON_RAW_KEYWORDS: [&str; 4] = ["self", "Self", "super", "crate"];

#[must_use]
pub(crate) fn is_valid_identifier(name: &str) -> bool {
  IDENTIFIER_RE.is_match(name)
}

/// Converts a GraphQL field name to `snake_case`.
///
/// An underscore goes before an uppercase letter that follows a lowercase letter or digit, and
/// before the last uppercase letter of a run when a lowercase letter follows it, so `HTTPServer`
/// becomes `http_server` and `field1` is left untouched.
#[must_use]
pub(crate) fn to_snake_case(name: &str) -> String {
  let chars = name.chars().collect::<Vec<_>>();
  let mut out = String::with_capacity(name.len() + 4);

  for (i, &c) in chars.iter().enumerate() {
    if c.is_ascii_uppercase() && i > 0 {
      let prev = chars[i - 1];
      let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
      let after_word = prev.is_ascii_lowercase() || prev.is_ascii_digit();
      let ends_run = prev.is_ascii_uppercase() && next_is_lower;
      if after_word || ends_run {
        out.push('_');
      }
    }
    out.push(c.to_ascii_lowercase());
  }

  out
}

/// Generated field name and, when it differs, the schema name to alias it to.
#[must_use]
pub(crate) fn field_name(schema_name: &str, convert_to_snake_case: bool) -> (String, Option<String>) {
  let name = if convert_to_snake_case {
    to_snake_case(schema_name)
  } else {
    schema_name.to_string()
  };
  let alias = (name != schema_name).then(|| schema_name.to_string());
  (name, alias)
}

/// Rust variant name of a GraphQL enum value: `IN_PROGRESS` becomes `InProgress`.
#[must_use]
pub(crate) fn to_variant_name(value: &str) -> String {
  let pascal = value.to_lowercase().to_pascal_case();
  if pascal.is_empty() || pascal.starts_with(|c: char| c.is_ascii_digit()) {
    format!("V{pascal}")
  } else {
    pascal
  }
}
