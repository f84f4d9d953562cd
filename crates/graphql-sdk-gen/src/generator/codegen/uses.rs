use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Path;

use crate::generator::ast::ImportDecl;

/// `use` path of an import: one `super::` per relative level, dotted modules split into segments.
pub(super) fn module_path(import: &ImportDecl) -> String {
  let segments = std::iter::repeat_n("super", import.level as usize)
    .chain(import.module.split('.').filter(|segment| !segment.is_empty()))
    .collect::<Vec<_>>();
  segments.join("::")
}

pub(super) struct UseFragment {
  module: String,
  items: Vec<String>,
}

impl UseFragment {
  pub(super) fn new(module: String, items: Vec<String>) -> Self {
    Self { module, items }
  }
}

impl ToTokens for UseFragment {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let Some(path) = syn::parse_str::<Path>(&self.module).ok() else {
      return;
    };

    let items = self
      .items
      .iter()
      .filter_map(|item| syn::parse_str::<Path>(item).ok())
      .collect::<Vec<_>>();

    match items.as_slice() {
      [] => {}
      [single] => tokens.extend(quote! { use #path::#single; }),
      _ => tokens.extend(quote! { use #path::{#(#items),*}; }),
    }
  }
}

/// All `use` declarations of a generated module, `serde` first.
pub(super) struct ModuleUsesFragment<'a>(&'a [ImportDecl]);

impl<'a> ModuleUsesFragment<'a> {
  pub(super) fn new(imports: &'a [ImportDecl]) -> Self {
    Self(imports)
  }
}

impl ToTokens for ModuleUsesFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    tokens.extend(quote! { use serde::{Deserialize, Serialize}; });
    for import in self.0 {
      let path = module_path(import);
      if path.is_empty() {
        continue;
      }
      UseFragment::new(path, import.names.iter().cloned().collect()).to_tokens(tokens);
    }
  }
}
