//! Value-object error model.

use thiserror::Error;
use valcast_validation::ValidationError;

/// Result type used by the value-object lifecycle.
pub type ValueObjectResult<T> = Result<T, ValueObjectError>;

/// Input whose shape cannot be turned into the canonical value at all.
///
/// This is not a rule violation: rules never ran because there was nothing
/// sensible to validate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed input: {0}")]
pub struct TransformError(String);

impl TransformError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// A value that cannot be encoded to, or decoded from, its JSON/storage form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("serialization failed: {0}")]
pub struct SerializationError(String);

impl SerializationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Failure to construct or convert a value object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Declared rules rejected the transformed value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `transform_input` refused the raw input.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The value is not representable as JSON / storage data.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl ValueObjectError {
    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ValueObjectError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ValueObjectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valcast_validation::ValidationErrors;

    #[test]
    fn validation_errors_keep_their_summary() {
        let err: ValueObjectError = ValidationError::new(ValidationErrors::new()).into();
        assert_eq!(err.to_string(), "The given data was invalid.");
        assert!(err.as_validation().is_some());
    }

    #[test]
    fn transform_errors_are_distinct_from_validation() {
        let err: ValueObjectError = TransformError::new("not a numeral").into();
        assert_eq!(err.to_string(), "malformed input: not a numeral");
        assert!(err.as_validation().is_none());
    }
}
