use std::collections::BTreeSet;

use strum::Display;

use crate::generator::{
  ast::{Annotation, ClassDecl},
  config::GeneratorConfig,
  schema::UPLOAD_SCALAR,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub input_types_generated: usize,
  pub fields_generated: usize,
  pub defaults_translated: usize,
  pub forward_references: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_class(&mut self, class: &ClassDecl) {
    self.input_types_generated += 1;
    self.fields_generated += class.fields.len();
    self.defaults_translated += class.fields.iter().filter(|field| field.default.is_some()).count();
    self.forward_references += class.forward_refs.len();

    for field in &class.fields {
      let Some(default) = field.default.as_ref().filter(|default| default.has_deferred_construct()) else {
        continue;
      };
      let mut constructed = vec![];
      default.constructed_classes(&mut constructed);
      for target in constructed.into_iter().filter(|class_ref| class_ref.is_deferred()) {
        self.record_warning(GenerationWarning::DeferredConstruction {
          type_name: class.name.clone(),
          field_name: field.schema_name().to_string(),
          target: target.name().to_string(),
        });
      }
    }
  }

  pub fn record_classes(&mut self, classes: &[ClassDecl]) {
    for class in classes {
      self.record_class(class);
    }
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  /// Notes custom scalars that fall back to the scalars module because no binding names them.
  pub fn record_unbound_scalars(&mut self, classes: &[ClassDecl], config: &GeneratorConfig) {
    let mut seen = BTreeSet::new();
    for class in classes {
      for field in &class.fields {
        field.annotation.walk(&mut |node| {
          if let Annotation::Scalar(scalar) = node
            && scalar.schema_name != UPLOAD_SCALAR
            && config.scalar_binding(&scalar.schema_name).is_none()
          {
            seen.insert(scalar.schema_name.clone());
          }
        });
      }
    }
    self.record_warnings(seen.into_iter().map(|scalar| GenerationWarning::UnboundScalar {
      scalar,
      module: config.scalars_module_name.clone(),
    }));
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Default of '{type_name}.{field_name}' constructs '{target}' before it is declared")]
  DeferredConstruction {
    type_name: String,
    field_name: String,
    target: String,
  },
  #[strum(to_string = "Custom scalar '{scalar}' has no binding and is imported from '{module}'")]
  UnboundScalar { scalar: String, module: String },
}
