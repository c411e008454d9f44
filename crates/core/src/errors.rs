use crate::concern::Concern;
use thiserror::Error;

/// A field was read or deleted while it had no stored value and no default
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{schema}' object has no attribute '{attribute}'")]
pub struct AttributeMissing {
    /// Name of the schema the instance belongs to
    pub schema: String,
    /// Storage name of the field
    pub attribute: String,
}

impl AttributeMissing {
    pub fn new(schema: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            attribute: attribute.into(),
        }
    }
}

/// Failures of instance-level field access
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error(transparent)]
    AttributeMissing(#[from] AttributeMissing),

    #[error(transparent)]
    Concern(#[from] Concern),

    #[error("'{schema}' declares no field named '{field}'")]
    UnknownField { schema: String, field: String },
}

impl SchemaError {
    /// Create a new unknown field error
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            schema: schema.into(),
            field: field.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SchemaError::AttributeMissing(_))
    }

    /// The concern, if this failure came from validation
    pub fn as_concern(&self) -> Option<&Concern> {
        match self {
            SchemaError::Concern(concern) => Some(concern),
            _ => None,
        }
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
