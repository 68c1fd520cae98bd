//! Optional custom persistence for value objects.
//!
//! By default a value object is stored as the serde encoding of its value and
//! read back by decoding the stored cell into its input type. A type that
//! needs a different column format implements [`Serializable`] and opts in
//! from [`ValueObject::persistence`](crate::ValueObject::persistence):
//!
//! ```ignore
//! impl ValueObject for Address {
//!     // ...
//!     fn persistence() -> Option<Persistence<Self>> {
//!         Some(Persistence::custom())
//!     }
//! }
//! ```

use core::fmt;

use crate::error::SerializationError;
use crate::value_object::ValueObject;

/// A single storage cell as the host record keeps it.
pub type StoredValue = serde_json::Value;

/// Custom encode/decode between the canonical value and a storage cell.
///
/// Implementing this trait alone changes nothing: cast adapters only look at
/// [`ValueObject::persistence`], so the type must also return
/// `Some(Persistence::custom())` from it. Without that override the hooks are
/// never called and the default serde encoding is used on read and write.
pub trait Serializable: ValueObject {
    /// Canonical value → storage cell.
    fn serialize(value: &Self::Value) -> Result<StoredValue, SerializationError>;

    /// Storage cell → construction input. The result still goes through
    /// `transform_input` and validation.
    fn unserialize(stored: StoredValue) -> Result<Self::Input, SerializationError>;
}

/// The persistence hooks of one value-object type.
pub struct Persistence<T: ValueObject> {
    serialize: fn(&T::Value) -> Result<StoredValue, SerializationError>,
    unserialize: fn(StoredValue) -> Result<T::Input, SerializationError>,
}

impl<T: Serializable> Persistence<T> {
    /// Hooks backed by the type's [`Serializable`] implementation.
    pub fn custom() -> Self {
        Self {
            serialize: <T as Serializable>::serialize,
            unserialize: <T as Serializable>::unserialize,
        }
    }
}

impl<T: ValueObject> Persistence<T> {
    pub fn serialize(&self, value: &T::Value) -> Result<StoredValue, SerializationError> {
        (self.serialize)(value)
    }

    pub fn unserialize(&self, stored: StoredValue) -> Result<T::Input, SerializationError> {
        (self.unserialize)(stored)
    }
}

impl<T: ValueObject> Clone for Persistence<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ValueObject> Copy for Persistence<T> {}

impl<T: ValueObject> fmt::Debug for Persistence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence")
            .field("type", &T::TYPE_NAME)
            .finish_non_exhaustive()
    }
}
