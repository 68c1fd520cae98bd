//! `valcast-core`: self-validating value objects.
//!
//! A value object transforms its raw input into a canonical value, validates
//! that value against its declared rules and freezes it. This crate holds
//! that lifecycle plus the conversions every value object offers (array,
//! JSON, string, DTO) and the optional custom persistence capability.

pub mod dto;
pub mod error;
pub mod key;
pub mod persistence;
pub mod value_object;

pub use dto::{Dto, Transferable};
pub use error::{SerializationError, TransformError, ValueObjectError, ValueObjectResult};
pub use key::{default_key, snake_case};
pub use persistence::{Persistence, Serializable, StoredValue};
pub use value_object::{Frozen, JsonOptions, Validated, ValueObject};

/// Rule engine the lifecycle validates with.
pub use valcast_validation as validation;

/// Name reported when something is not a value-object type.
pub const VALUE_OBJECT_BASE: &str = "valcast_core::ValueObject";

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
