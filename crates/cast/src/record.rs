//! Host-record side of casting: cast configuration and an in-memory record.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use valcast_core::{StoredValue, ValueObject};

use crate::adapter::CastAdapter;
use crate::cast_type::{CastRegistry, CastType};
use crate::error::{CastError, CastResult};

/// A record's stored cells, by field name.
pub type Attributes = IndexMap<String, StoredValue>;

/// What a cast adapter needs to know about the record it works for.
pub trait HostRecord {
    /// Model name used in error messages.
    fn model_name(&self) -> &str;

    /// Value-object type declared for `key`, if the field is cast.
    fn declared_cast(&self, key: &str) -> Option<CastType>;
}

impl<R> HostRecord for Arc<R>
where
    R: HostRecord + ?Sized,
{
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn declared_cast(&self, key: &str) -> Option<CastType> {
        (**self).declared_cast(key)
    }
}

/// Model name plus its field → value-object cast configuration.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    casts: IndexMap<String, CastType>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            casts: IndexMap::new(),
        }
    }

    /// Cast field `key` to `T`.
    pub fn cast<T: ValueObject + 'static>(mut self, key: impl Into<String>) -> Self {
        self.casts.insert(key.into(), CastType::of::<T>());
        self
    }

    /// Cast field `key` to the type registered as `class`.
    pub fn cast_named(
        mut self,
        registry: &CastRegistry,
        key: impl Into<String>,
        class: &str,
    ) -> CastResult<Self> {
        let cast_type = registry.resolve(class)?;
        self.casts.insert(key.into(), cast_type);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn casts(&self) -> impl Iterator<Item = (&str, CastType)> {
        self.casts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_cast(&self, key: &str) -> bool {
        self.casts.contains_key(key)
    }
}

impl HostRecord for ModelSchema {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn declared_cast(&self, key: &str) -> Option<CastType> {
        self.casts.get(key).copied()
    }
}

/// One row of a model: stored cells plus the schema's casts.
///
/// Value objects go in through [`Record::set`] and come out through
/// [`Record::get`]; other fields are read and written raw.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<ModelSchema>,
    attributes: Attributes,
}

impl Record {
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self::from_attributes(schema, Attributes::new())
    }

    /// Hydrate a record from stored cells.
    pub fn from_attributes(schema: Arc<ModelSchema>, attributes: Attributes) -> Self {
        Self { schema, attributes }
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    /// Assign a value object to the cast field `key`.
    pub fn set<V: ValueObject + 'static>(&mut self, key: &str, value: &V) -> CastResult<()> {
        let stored = CastAdapter::<V>::new().set(&*self, key, value, &self.attributes)?;
        self.attributes.insert(key.to_string(), stored);
        Ok(())
    }

    /// Read the cast field `key` as `T`. A missing cell reads as `null`, which
    /// fails to decode unless `T`'s input (or custom persistence) accepts it.
    pub fn get<T>(&self, key: &str) -> CastResult<T>
    where
        T: ValueObject + 'static,
        T::Input: DeserializeOwned,
    {
        self.ensure_declared::<T>(key)?;
        let null = StoredValue::Null;
        let raw = self.attributes.get(key).unwrap_or(&null);
        CastAdapter::<T>::new().get(self, key, raw, &self.attributes)
    }

    /// Like [`Record::get`], but an absent or `null` cell is `None`.
    pub fn get_optional<T>(&self, key: &str) -> CastResult<Option<T>>
    where
        T: ValueObject + 'static,
        T::Input: DeserializeOwned,
    {
        match self.attributes.get(key) {
            None | Some(StoredValue::Null) => {
                self.ensure_declared::<T>(key)?;
                Ok(None)
            }
            Some(_) => self.get(key).map(Some),
        }
    }

    /// Write a cell without any casting.
    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<StoredValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Read a cell without any casting.
    pub fn raw(&self, key: &str) -> Option<&StoredValue> {
        self.attributes.get(key)
    }

    fn ensure_declared<T: ValueObject + 'static>(&self, key: &str) -> CastResult<()> {
        match self.declared_cast(key) {
            Some(declared) if declared.is::<T>() => Ok(()),
            declared => Err(CastError::invalid_type(
                self.model_name(),
                key,
                declared
                    .map(|d| d.name())
                    .unwrap_or(crate::adapter::UNDECLARED),
            )),
        }
    }
}

impl HostRecord for Record {
    fn model_name(&self) -> &str {
        self.schema.model_name()
    }

    fn declared_cast(&self, key: &str) -> Option<CastType> {
        self.schema.declared_cast(key)
    }
}
