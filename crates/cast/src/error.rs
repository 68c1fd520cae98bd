//! Cast error model.

use thiserror::Error;
use valcast_core::{VALUE_OBJECT_BASE, ValueObjectError};

/// Result type used by cast adapters and records.
pub type CastResult<T> = Result<T, CastError>;

/// Failure to move a value object in or out of a record field.
#[derive(Debug, Error)]
pub enum CastError {
    /// A cast names something that is not a usable value-object type.
    #[error(
        "The class \"{class}\" is not inherited from the \"{base}\" and does not implement the necessary functionality"
    )]
    Configuration { class: String, base: &'static str },

    /// A value of the wrong type was assigned to a cast field.
    #[error("The Eloquent Model \"{model}\" must use the type \"{expected}\" specified in casts -> {key}")]
    InvalidType {
        model: String,
        key: String,
        expected: String,
    },

    /// The stored cell does not decode into the value object's input type.
    #[error("stored value of `{key}` cannot be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Construction or conversion of the value object failed.
    #[error(transparent)]
    ValueObject(#[from] ValueObjectError),
}

impl CastError {
    pub fn configuration(class: impl Into<String>) -> Self {
        Self::Configuration {
            class: class.into(),
            base: VALUE_OBJECT_BASE,
        }
    }

    pub fn invalid_type(
        model: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            model: model.into(),
            key: key.into(),
            expected: expected.into(),
        }
    }

    pub fn decode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            key: key.into(),
            source,
        }
    }

    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&valcast_core::validation::ValidationError> {
        match self {
            CastError::ValueObject(err) => err.as_validation(),
            _ => None,
        }
    }
}
