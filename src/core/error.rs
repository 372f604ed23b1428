use crate::core::Value;
use thiserror::Error;

/// Failures raised by validated fields and their registries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Invalid value for {field}: {value}")]
    Validation { field: String, value: Value },

    #[error("Field already bound as '{bound}', cannot rebind as '{requested}'")]
    AlreadyBound { bound: String, requested: String },

    #[error("Field is not bound to a name")]
    Unbound,

    #[error("Field '{field}' is not declared on '{owner}'")]
    UnknownField { owner: String, field: String },

    #[error("Field '{field}' is already declared on '{owner}'")]
    DuplicateField { owner: String, field: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl FieldError {
    /// Name of the rejected field, if this is a validation failure
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// The rejected candidate, if this is a validation failure
    pub fn rejected_value(&self) -> Option<&Value> {
        match self {
            Self::Validation { value, .. } => Some(value),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

/// Crate-level error wrapping every module failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub type Result<T> = std::result::Result<T, Error>;
pub type FieldResult<T> = std::result::Result<T, FieldError>;
pub type CacheResult<T> = std::result::Result<T, CacheError>;
