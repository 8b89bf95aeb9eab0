//! Error types for `clubsite-core`.
//!
//! Two failure kinds are kept apart:
//! [`ValidationError`] is bad user input and maps to a rejected save, while
//! [`SchemaError`] means a declared schema is itself malformed and is a
//! configuration defect.

use serde_json::Value;
use thiserror::Error;

/// A value failed a conformance, range, contact, or relation check.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
  pub message: String,
  /// The offending JSON value, when the failure came from a schema check.
  pub value:   Option<Value>,
}

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), value: None }
  }

  /// A uniform "failed JSON schema check" failure carrying `value`.
  pub fn schema_mismatch(value: &Value) -> Self {
    Self {
      message: format!("{value} failed JSON schema check"),
      value:   Some(value.clone()),
    }
  }
}

/// A schema description violates the schema-of-schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed schema: {0}")]
pub struct SchemaError(pub String);

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Schema(#[from] SchemaError),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Shorthand for a [`ValidationError`] with only a message.
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::Validation(ValidationError::new(message))
  }

  pub fn is_validation(&self) -> bool { matches!(self, Self::Validation(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
