use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  /// Splits a GraphQL description into lines, dropping the blank lines at either end.
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    let lines = input.lines().map(str::trim_end).collect::<Vec<_>>();
    let start = lines.iter().position(|line| !line.trim().is_empty()).unwrap_or(lines.len());
    let end = lines
      .iter()
      .rposition(|line| !line.trim().is_empty())
      .map_or(start, |i| i + 1);
    Self::from_lines(lines[start..end].iter().copied())
  }

  #[must_use]
  pub fn from_optional(desc: Option<&String>) -> Self {
    desc.map_or_else(Self::default, |d| Self::from_raw(d))
  }

  #[must_use]
  pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}

impl ToTokens for Documentation {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let doc_lines = self.lines.iter().map(|line| {
      let line = if line.is_empty() { String::new() } else { format!(" {line}") };
      quote! { #[doc = #line] }
    });
    quote! { #(#doc_lines)* }.to_tokens(tokens);
  }
}
