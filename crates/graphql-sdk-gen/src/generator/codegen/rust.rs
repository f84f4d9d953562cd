//! Serde struct rendering.
//!
//! Deferred class references become `Box<T>` so self and mutually recursive inputs have a finite
//! size. Defaults are exposed as associated functions referenced from `#[serde(default = "...")]`,
//! and the base model is a marker trait implemented by every generated struct.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

use super::{Renderer, uses::ModuleUsesFragment};
use crate::generator::{
  ast::{Annotation, ClassDecl, ClassRef, Expr, FieldDecl, KeywordArg, ModuleTree, Primitive},
  naming::identifiers::{RUST_KEYWORDS, RUST_NON_RAW_KEYWORDS, is_valid_identifier, to_variant_name},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl Renderer for RustRenderer {
  fn file_extension(&self) -> &'static str {
    "rs"
  }

  fn comment_prefix(&self) -> &'static str {
    "//!"
  }

  fn reserved_names(&self) -> &'static [&'static str] {
    &["Serialize", "Deserialize", "Box", "Vec", "Option", "String"]
  }

  fn render(&self, module: &ModuleTree) -> anyhow::Result<String> {
    if module.classes.is_empty() {
      return Ok(String::new());
    }

    let generator = StructGenerator::new(module);
    let structs = module
      .classes
      .iter()
      .map(|class| generator.generate(class))
      .collect::<anyhow::Result<Vec<_>>>()?;
    let uses = ModuleUsesFragment::new(&module.imports);

    let code = quote! {
      #uses

      #(#structs)*
    };
    let syntax_tree = syn::parse2::<syn::File>(code)?;
    Ok(prettyplease::unparse(&syntax_tree))
  }
}

/// Rust spelling of a generated field: the identifier and, when serde would not derive the
/// schema name from it, the name to rename to.
struct FieldIdent {
  ident: Ident,
  plain: String,
  rename: Option<String>,
}

impl FieldIdent {
  fn of(field: &FieldDecl) -> anyhow::Result<Self> {
    Self::new(&field.name, field.schema_name())
  }

  fn new(name: &str, schema_name: &str) -> anyhow::Result<Self> {
    if !is_valid_identifier(name) {
      anyhow::bail!("'{name}' is not a valid Rust field name");
    }
    let (ident, plain) = if RUST_NON_RAW_KEYWORDS.contains(&name) || name == "_" {
      let plain = format!("{name}_");
      (Ident::new(&plain, Span::call_site()), plain)
    } else if RUST_KEYWORDS.contains(name) {
      (Ident::new_raw(name, Span::call_site()), name.to_string())
    } else {
      (Ident::new(name, Span::call_site()), name.to_string())
    };
    let rename = (plain != schema_name).then(|| schema_name.to_string());
    Ok(Self { ident, plain, rename })
  }

  fn default_fn(&self) -> Ident {
    format_ident!("default_{}", self.plain)
  }
}

fn type_ident(name: &str) -> anyhow::Result<Ident> {
  if !is_valid_identifier(name) || RUST_KEYWORDS.contains(name) || name == "_" {
    anyhow::bail!("'{name}' is not a valid Rust type name");
  }
  Ok(Ident::new(name, Span::call_site()))
}

struct StructGenerator<'a> {
  module: &'a ModuleTree,
}

impl<'a> StructGenerator<'a> {
  fn new(module: &'a ModuleTree) -> Self {
    Self { module }
  }

  fn generate(&self, class: &ClassDecl) -> anyhow::Result<TokenStream> {
    let name = type_ident(&class.name)?;
    let base = type_ident(&class.base)?;
    let docs = &class.docs;

    let mut fields = vec![];
    let mut default_fns = vec![];
    for field in &class.fields {
      let ident = FieldIdent::of(field)?;
      let ty = self.annotation_type(&field.annotation)?;
      let field_docs = &field.docs;
      let field_ident = &ident.ident;

      let rename = ident.rename.as_ref().map(|rename| quote! { #[serde(rename = #rename)] });
      let default_attr = match &field.default {
        Some(expr) => {
          let fn_name = ident.default_fn();
          let path = format!("{}::{fn_name}", class.name);
          let value = self.value(expr, &field.annotation)?;
          default_fns.push(quote! {
            pub fn #fn_name() -> #ty {
              #value
            }
          });
          Some(quote! { #[serde(default = #path)] })
        }
        None if field.annotation.is_optional() => Some(quote! { #[serde(default)] }),
        None => None,
      };

      fields.push(quote! {
        #field_docs
        #rename
        #default_attr
        pub #field_ident: #ty
      });
    }

    let impl_block = if default_fns.is_empty() {
      quote! {}
    } else {
      quote! {
        impl #name {
          #(#default_fns)*
        }
      }
    };

    Ok(quote! {
      #docs
      #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
      pub struct #name {
        #(#fields),*
      }

      #impl_block

      impl #base for #name {}
    })
  }

  fn annotation_type(&self, annotation: &Annotation) -> anyhow::Result<TokenStream> {
    Ok(match annotation {
      Annotation::Builtin(Primitive::Integer) => quote! { i32 },
      Annotation::Builtin(Primitive::Float) => quote! { f64 },
      Annotation::Builtin(Primitive::Text) => quote! { String },
      Annotation::Builtin(Primitive::Bool) => quote! { bool },
      Annotation::Enum(name) => {
        let ident = type_ident(name)?;
        quote! { #ident }
      }
      Annotation::Scalar(scalar) => {
        let ty = syn::parse_str::<syn::Type>(&scalar.name)
          .map_err(|e| anyhow::anyhow!("invalid type '{}' for scalar '{}': {e}", scalar.name, scalar.schema_name))?;
        quote! { #ty }
      }
      Annotation::Class(ClassRef::Direct(name)) => {
        let ident = type_ident(name)?;
        quote! { #ident }
      }
      Annotation::Class(ClassRef::Deferred(name)) => {
        let ident = type_ident(name)?;
        quote! { Box<#ident> }
      }
      Annotation::Optional(inner) => {
        let inner = self.annotation_type(inner)?;
        quote! { Option<#inner> }
      }
      Annotation::List(inner) => {
        let inner = self.annotation_type(inner)?;
        quote! { Vec<#inner> }
      }
    })
  }

  /// Spells `expr` as a value of the type `annotation` renders to.
  #[allow(clippy::cast_precision_loss)]
  fn value(&self, expr: &Expr, annotation: &Annotation) -> anyhow::Result<TokenStream> {
    Ok(match (annotation, expr) {
      (Annotation::Optional(_), Expr::Null) => quote! { None },
      (Annotation::Optional(inner), expr) => {
        let value = self.value(expr, inner)?;
        quote! { Some(#value) }
      }
      (Annotation::List(inner), Expr::List(items)) => {
        let items = items
          .iter()
          .map(|item| self.value(item, inner))
          .collect::<anyhow::Result<Vec<_>>>()?;
        quote! { vec![#(#items),*] }
      }
      (Annotation::Builtin(Primitive::Integer), Expr::Int(value)) => int_literal(*value),
      (Annotation::Builtin(Primitive::Float), Expr::Float(value)) => float_literal(*value),
      (Annotation::Builtin(Primitive::Float), Expr::Int(value)) => float_literal(*value as f64),
      (Annotation::Builtin(Primitive::Text), Expr::Str(value)) => quote! { String::from(#value) },
      (Annotation::Builtin(Primitive::Bool), Expr::Bool(value)) => quote! { #value },
      (Annotation::Enum(_), Expr::Attribute { value, attr }) => {
        let Expr::Name(enum_name) = value.as_ref() else {
          anyhow::bail!("enum value '{attr}' is not qualified by its enum name");
        };
        let enum_ident = type_ident(enum_name)?;
        let variant = format_ident!("{}", to_variant_name(attr));
        quote! { #enum_ident::#variant }
      }
      (Annotation::Scalar(_), Expr::Int(value)) => {
        let literal = int_literal(*value);
        quote! { Into::into(#literal) }
      }
      (Annotation::Scalar(_), Expr::Float(value)) => {
        let literal = float_literal(*value);
        quote! { Into::into(#literal) }
      }
      (Annotation::Scalar(_), Expr::Str(value)) => quote! { Into::into(#value) },
      (Annotation::Scalar(_), Expr::Bool(value)) => quote! { Into::into(#value) },
      (Annotation::Class(class_ref), Expr::Construct { class, args }) => {
        let literal = self.struct_literal(class.name(), args)?;
        if class_ref.is_deferred() {
          quote! { Box::new(#literal) }
        } else {
          literal
        }
      }
      (annotation, expr) => anyhow::bail!("cannot express {expr:?} as a value of {annotation:?}"),
    })
  }

  /// A struct literal naming every field: absent arguments take the field's own default.
  fn struct_literal(&self, class_name: &str, args: &[KeywordArg]) -> anyhow::Result<TokenStream> {
    let Some(decl) = self.module.class(class_name) else {
      anyhow::bail!("constructed class '{class_name}' is not part of the module");
    };
    let name = type_ident(class_name)?;

    let fields = decl
      .fields
      .iter()
      .map(|field| {
        let ident = FieldIdent::of(field)?;
        let field_ident = &ident.ident;
        let value = match args.iter().find(|arg| arg.name == field.name) {
          Some(arg) => self.value(&arg.value, &arg.annotation)?,
          None if field.default.is_some() => {
            let fn_name = ident.default_fn();
            quote! { #name::#fn_name() }
          }
          None if field.annotation.is_optional() => quote! { None },
          None => anyhow::bail!("required field '{}' of '{class_name}' has no value", field.name),
        };
        Ok(quote! { #field_ident: #value })
      })
      .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(quote! { #name { #(#fields),* } })
  }
}

fn int_literal(value: i64) -> TokenStream {
  let literal = Literal::u64_unsuffixed(value.unsigned_abs());
  if value < 0 {
    quote! { -#literal }
  } else {
    quote! { #literal }
  }
}

fn float_literal(value: f64) -> TokenStream {
  let literal = Literal::f64_unsuffixed(value.abs());
  if value.is_sign_negative() {
    quote! { -#literal }
  } else {
    quote! { #literal }
  }
}
