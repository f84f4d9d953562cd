use std::collections::{BTreeMap, BTreeSet};

use crate::generator::{
  ast::{Annotation, ClassDecl, Expr, ImportDecl, ModuleTree},
  config::GeneratorConfig,
};

/// Combines class declarations with the imports they need into one module.
pub struct ModuleAssembler<'a> {
  config: &'a GeneratorConfig,
}

impl<'a> ModuleAssembler<'a> {
  #[must_use]
  pub fn new(config: &'a GeneratorConfig) -> Self {
    Self { config }
  }

  #[must_use]
  pub fn assemble(&self, classes: Vec<ClassDecl>) -> ModuleTree {
    let mut imports = ImportSet::default();

    if !classes.is_empty() {
      let base = &self.config.base_model_import;
      imports.add(&base.module, base.level, &base.name);
    }

    for class in &classes {
      for field in &class.fields {
        self.collect_annotation(&field.annotation, &mut imports);
        if let Some(default) = &field.default {
          self.collect_expr(default, &mut imports);
        }
      }
    }

    ModuleTree {
      imports: imports.into_decls(),
      classes,
    }
  }

  fn collect_annotation(&self, annotation: &Annotation, imports: &mut ImportSet) {
    annotation.walk(&mut |node| match node {
      Annotation::Enum(name) => imports.add(&self.config.enums_module, 1, name),
      Annotation::Scalar(scalar) => {
        if let Some(import) = &scalar.import {
          imports.add(&import.module, import.level, &import.name);
        }
      }
      Annotation::Builtin(_) | Annotation::Class(_) | Annotation::Optional(_) | Annotation::List(_) => {}
    });
  }

  fn collect_expr(&self, expr: &Expr, imports: &mut ImportSet) {
    match expr {
      Expr::Construct { args, .. } => {
        for arg in args {
          self.collect_annotation(&arg.annotation, imports);
          self.collect_expr(&arg.value, imports);
        }
      }
      Expr::List(items) => {
        for item in items {
          self.collect_expr(item, imports);
        }
      }
      Expr::Attribute { value, .. } => self.collect_expr(value, imports),
      Expr::Int(_) | Expr::Float(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Null | Expr::Name(_) => {}
    }
  }
}

#[derive(Debug, Default)]
struct ImportSet {
  entries: BTreeMap<(String, u32), BTreeSet<String>>,
}

impl ImportSet {
  fn add(&mut self, module: &str, level: u32, name: &str) {
    self
      .entries
      .entry((module.to_string(), level))
      .or_default()
      .insert(name.to_string());
  }

  fn into_decls(self) -> Vec<ImportDecl> {
    self
      .entries
      .into_iter()
      .map(|((module, level), names)| ImportDecl { module, level, names })
      .collect()
  }
}
