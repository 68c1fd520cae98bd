//! References to value-object types, and a registry resolving them by name.

use core::any::TypeId;
use core::fmt;

use indexmap::IndexMap;
use valcast_core::ValueObject;

use crate::error::{CastError, CastResult};

/// Reference to a value-object type, as written in a cast configuration.
///
/// Two references are equal iff they name the same Rust type.
#[derive(Clone, Copy)]
pub struct CastType {
    name: &'static str,
    type_id: TypeId,
}

impl CastType {
    pub fn of<T: ValueObject + 'static>() -> Self {
        Self {
            name: T::TYPE_NAME,
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for CastType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CastType {}

impl fmt::Debug for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CastType").field(&self.name).finish()
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Value-object types known by name.
///
/// Resolving a name that was never registered is a configuration mistake and
/// fails with [`CastError::Configuration`].
#[derive(Debug, Clone, Default)]
pub struct CastRegistry {
    types: IndexMap<String, CastType>,
}

impl CastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its type name.
    pub fn register<T: ValueObject + 'static>(&mut self) -> &mut Self {
        self.register_as::<T>(T::TYPE_NAME)
    }

    /// Register `T` under an alias (e.g. a fully qualified name).
    pub fn register_as<T: ValueObject + 'static>(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        tracing::trace!(name = %name, value_object = T::TYPE_NAME, "registering cast type");
        self.types.insert(name, CastType::of::<T>());
        self
    }

    pub fn with<T: ValueObject + 'static>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn resolve(&self, class: &str) -> CastResult<CastType> {
        self.types
            .get(class)
            .copied()
            .ok_or_else(|| CastError::configuration(class))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.types.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valcast_catalog::{Email, RomanNumber};

    #[test]
    fn types_compare_by_identity_not_name() {
        assert_eq!(CastType::of::<Email>(), CastType::of::<Email>());
        assert_ne!(CastType::of::<Email>(), CastType::of::<RomanNumber>());
        assert!(CastType::of::<Email>().is::<Email>());
        assert_eq!(CastType::of::<RomanNumber>().to_string(), "RomanNumber");
    }

    #[test]
    fn resolves_registered_names_and_aliases() {
        let mut registry = CastRegistry::new();
        registry
            .register::<Email>()
            .register_as::<Email>("valcast_catalog::email::Email");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Email"));
        assert_eq!(
            registry.resolve("valcast_catalog::email::Email").unwrap(),
            CastType::of::<Email>()
        );
    }

    #[test]
    fn unknown_names_are_configuration_errors() {
        let registry = CastRegistry::new();
        assert!(registry.is_empty());
        match registry.resolve("Money").unwrap_err() {
            CastError::Configuration { class, base } => {
                assert_eq!(class, "Money");
                assert_eq!(base, valcast_core::VALUE_OBJECT_BASE);
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }
}
