//! Bridge between a record field and a value object.

use core::fmt;
use core::marker::PhantomData;

use serde::de::DeserializeOwned;
use valcast_core::{Frozen, StoredValue, ValueObject, ValueObjectError};

use crate::cast_type::{CastRegistry, CastType};
use crate::error::{CastError, CastResult};
use crate::record::{Attributes, HostRecord};

/// Casts one record field to and from the value object `T`.
///
/// Adapters hold no state: every `get`/`set` is independent and nothing is
/// cached between calls.
pub struct CastAdapter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: ValueObject + 'static> CastAdapter<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Adapter for the type a cast configuration names as `class`.
    ///
    /// Fails with [`CastError::Configuration`] if `class` is unknown to the
    /// registry or names a different type than `T`.
    pub fn bind(registry: &CastRegistry, class: &str) -> CastResult<Self> {
        let resolved = registry.resolve(class)?;
        if resolved != CastType::of::<T>() {
            return Err(CastError::configuration(class));
        }
        Ok(Self::new())
    }

    pub fn cast_type(&self) -> CastType {
        CastType::of::<T>()
    }

    /// Build a `T` from the stored cell of field `key`.
    ///
    /// Custom persistence decodes the cell first; otherwise the cell is
    /// decoded straight into `T::Input`. Invalid stored data is an error, never
    /// a silent default.
    pub fn get<R>(&self, record: &R, key: &str, raw: &StoredValue, _attributes: &Attributes) -> CastResult<T>
    where
        R: HostRecord + ?Sized,
        T::Input: DeserializeOwned,
    {
        tracing::trace!(model = record.model_name(), key, value_object = T::TYPE_NAME, "casting stored value");

        let input = match T::persistence() {
            Some(persistence) => persistence
                .unserialize(raw.clone())
                .map_err(ValueObjectError::from)?,
            None => serde_json::from_value(raw.clone()).map_err(|e| CastError::decode(key, e))?,
        };

        Ok(T::create(input, Some(key))?)
    }

    /// Encode `candidate` for storage in field `key`.
    ///
    /// The candidate's type must be exactly the type `record` declares for the
    /// field; anything else is [`CastError::InvalidType`].
    pub fn set<R, V>(&self, record: &R, key: &str, candidate: &V, _attributes: &Attributes) -> CastResult<StoredValue>
    where
        R: HostRecord + ?Sized,
        V: ValueObject + 'static,
    {
        check_type::<R, V>(record, key)?;

        tracing::trace!(model = record.model_name(), key, value_object = V::TYPE_NAME, "storing value object");

        let stored = match V::persistence() {
            Some(persistence) => persistence
                .serialize(candidate.value())
                .map_err(ValueObjectError::from)?,
            None => serde_json::to_value(candidate.value()).map_err(ValueObjectError::from)?,
        };
        Ok(stored)
    }
}

fn check_type<R, V>(record: &R, key: &str) -> CastResult<()>
where
    R: HostRecord + ?Sized,
    V: ValueObject + 'static,
{
    match record.declared_cast(key) {
        Some(declared) if declared == CastType::of::<V>() => Ok(()),
        declared => Err(CastError::invalid_type(
            record.model_name(),
            key,
            declared.map(|d| d.name()).unwrap_or(UNDECLARED),
        )),
    }
}

/// Expected type reported for a field without a declared cast.
pub const UNDECLARED: &str = "undeclared";

impl<T: ValueObject + 'static> Default for CastAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CastAdapter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CastAdapter<T> {}

impl<T: ValueObject> fmt::Debug for CastAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CastAdapter").field(&T::TYPE_NAME).finish()
    }
}
