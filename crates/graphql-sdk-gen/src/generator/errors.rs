use thiserror::Error;

/// Failures of a generation run. Nothing is recovered internally: the first error aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
  /// A referenced type name does not exist in the schema, or names a type that cannot be used here.
  #[error("type '{type_name}' referenced by '{referenced_by}' is not an input type declared in the schema")]
  SchemaConsistency { type_name: String, referenced_by: String },

  /// A literal does not fit its expected type, or an unsupported literal kind was encountered.
  #[error("cannot generate '{type_name}.{field_name}': {message}")]
  Generation {
    type_name: String,
    field_name: String,
    message: String,
  },

  /// A generated identifier collides with a reserved or previously generated name.
  #[error("generated name '{name}' conflicts with {conflicts_with}")]
  NameConflict { name: String, conflicts_with: String },

  #[error("failed to parse schema: {message}")]
  Parse { message: String },
}

impl CodegenError {
  pub(crate) fn schema_consistency(type_name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
    Self::SchemaConsistency {
      type_name: type_name.into(),
      referenced_by: referenced_by.into(),
    }
  }

  pub(crate) fn generation(
    type_name: impl Into<String>,
    field_name: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self::Generation {
      type_name: type_name.into(),
      field_name: field_name.into(),
      message: message.into(),
    }
  }

  pub(crate) fn name_conflict(name: impl Into<String>, conflicts_with: impl Into<String>) -> Self {
    Self::NameConflict {
      name: name.into(),
      conflicts_with: conflicts_with.into(),
    }
  }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
