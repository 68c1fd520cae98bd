//! Value objects: validated, immutable, compared by value.
//!
//! A value object is defined entirely by its value. It is produced by one
//! lifecycle (resolve key → transform input → validate → freeze) and never
//! changes afterwards; "modifying" one means creating a new one.
//!
//! The shell of a value object (storage of key and value, equality, display,
//! serde) is generated by [`value_object!`](crate::value_object); the type
//! then supplies its hooks by implementing [`ValueObject`]:
//!
//! ```ignore
//! value_object! {
//!     /// A trimmed e-mail address.
//!     pub struct Email(String);
//! }
//!
//! impl ValueObject for Email {
//!     type Input = String;
//!
//!     fn transform_input(input: String) -> Result<String, TransformError> {
//!         Ok(input.trim().to_string())
//!     }
//!
//!     fn rules(key: &str) -> Rules {
//!         Rules::new().field(key, [Rule::Required, Rule::String, Rule::Email])
//!     }
//! }
//!
//! let email = Email::create("  test@gmail.com ".into(), None)?;
//! assert_eq!(email.value(), "test@gmail.com");
//! assert_eq!(email.key(), "email");
//! ```

use core::fmt;
use core::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};
use valcast_validation::{AttributeNames, Messages, RuleValidator, Rules, Validator};

use crate::error::{TransformError, ValueObjectResult};
use crate::key::resolve_key;
use crate::persistence::Persistence;

/// Key and value that passed the lifecycle of the value object `T`.
///
/// Only the lifecycle in this crate can create one, so holding a
/// `Validated<T>` proves the value was transformed and validated under `T`'s
/// rules. It cannot be handed to another value-object type, even one wrapping
/// the same kind of value:
///
/// ```compile_fail
/// use valcast_core::validation::{Rule, Rules};
/// use valcast_core::{Frozen, TransformError, ValueObject, value_object};
///
/// value_object! {
///     pub struct Word(String);
/// }
///
/// value_object! {
///     pub struct Email(String);
/// }
///
/// impl ValueObject for Word {
///     type Input = String;
///
///     fn transform_input(input: String) -> Result<String, TransformError> {
///         Ok(input)
///     }
///
///     fn rules(key: &str) -> Rules {
///         Rules::new().field(key, [Rule::String])
///     }
/// }
///
/// let word = Word::create("IV".into(), None).unwrap();
/// let _email = Email::from_validated(word.validated().clone());
/// ```
pub struct Validated<T: Frozen> {
    key: String,
    value: T::Value,
    _owner: PhantomData<fn() -> T>,
}

impl<T: Frozen> Validated<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &T::Value {
        &self.value
    }

    pub fn into_value(self) -> T::Value {
        self.value
    }
}

impl<T: Frozen> Clone for Validated<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            _owner: PhantomData,
        }
    }
}

impl<T: Frozen> PartialEq for Validated<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl<T: Frozen> fmt::Debug for Validated<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validated")
            .field("type", &T::TYPE_NAME)
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

/// The immutable shell around a validated value.
///
/// Implemented by [`value_object!`](crate::value_object); there is rarely a
/// reason to implement it by hand.
pub trait Frozen: Sized + Clone + fmt::Debug {
    /// Canonical in-memory representation.
    type Value: Clone + PartialEq + fmt::Debug + Serialize;

    /// Type name the default key is derived from.
    const TYPE_NAME: &'static str;

    fn from_validated(inner: Validated<Self>) -> Self;

    fn validated(&self) -> &Validated<Self>;

    /// Field name validation errors are reported under.
    fn key(&self) -> &str {
        self.validated().key()
    }

    /// The transformed payload.
    fn value(&self) -> &Self::Value {
        self.validated().value()
    }

    /// The value as text: strings verbatim, `null` as the empty string, any
    /// other value as compact JSON.
    fn to_string_representation(&self) -> String {
        string_representation(self.value())
    }
}

pub(crate) fn string_representation<V: Serialize + fmt::Debug>(value: &V) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        Ok(Value::Null) => String::new(),
        Ok(other) => other.to_string(),
        Err(_) => format!("{value:?}"),
    }
}

/// JSON encoding switches for [`ValueObject::to_json_with`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Indented, multi-line output.
    pub pretty: bool,
}

impl JsonOptions {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Hooks and lifecycle of a value object.
pub trait ValueObject: Frozen {
    /// Raw construction input, before transformation.
    type Input;

    /// Map raw input to the canonical value. Runs before validation, so rules
    /// see the canonical shape. Fails only for input that has no canonical
    /// form at all.
    fn transform_input(input: Self::Input) -> Result<Self::Value, TransformError>;

    /// Rules keyed by field path inside the `{ key: value }` bag.
    fn rules(key: &str) -> Rules;

    /// Custom messages keyed by `"path.rule"`.
    fn messages(_key: &str) -> Messages {
        Messages::new()
    }

    /// Display names for `:attribute` in messages.
    fn attribute_names(_key: &str) -> AttributeNames {
        AttributeNames::new()
    }

    /// Custom storage encoding, if the type has one.
    fn persistence() -> Option<Persistence<Self>> {
        None
    }

    /// Construct and validate with the built-in rule engine.
    fn create(input: Self::Input, key: Option<&str>) -> ValueObjectResult<Self> {
        Self::create_with(&RuleValidator::default(), input, key)
    }

    /// Construct and validate with the given validator.
    fn create_with<V>(validator: &V, input: Self::Input, key: Option<&str>) -> ValueObjectResult<Self>
    where
        V: Validator + ?Sized,
    {
        let key = resolve_key(key, Self::TYPE_NAME);

        let value = Self::transform_input(input).inspect_err(|err| {
            tracing::debug!(value_object = Self::TYPE_NAME, key = %key, error = %err, "input transform failed");
        })?;

        let bag = data_bag(&key, &value)?;
        let rules = Self::rules(&key);
        let messages = Self::messages(&key);
        let attributes = Self::attribute_names(&key);

        if let Err(err) = validator.validate(&bag, &rules, &messages, &attributes) {
            tracing::debug!(
                value_object = Self::TYPE_NAME,
                key = %key,
                failed_fields = err.errors().len(),
                "value object rejected"
            );
            return Err(err.into());
        }

        tracing::debug!(value_object = Self::TYPE_NAME, key = %key, "value object created");
        Ok(Self::from_validated(Validated {
            key,
            value,
            _owner: PhantomData,
        }))
    }

    /// The payload, for consumers that expect plain data.
    fn to_array(&self) -> Self::Value {
        self.value().clone()
    }

    fn to_json(&self) -> ValueObjectResult<String> {
        self.to_json_with(JsonOptions::default())
    }

    fn to_json_with(&self, options: JsonOptions) -> ValueObjectResult<String> {
        let json = if options.pretty {
            serde_json::to_string_pretty(self.value())?
        } else {
            serde_json::to_string(self.value())?
        };
        Ok(json)
    }
}

/// `{ key: value }`, nested along the dots of `key` so that rule paths such as
/// `user.email` resolve to the value.
fn data_bag<V: Serialize>(key: &str, value: &V) -> ValueObjectResult<Value> {
    let bag = key.rsplit('.').fold(serde_json::to_value(value)?, |inner, segment| {
        let mut level = Map::with_capacity(1);
        level.insert(segment.to_string(), inner);
        Value::Object(level)
    });
    Ok(bag)
}

/// Declare a value-object type wrapping a validated `$value`.
///
/// Generates the struct together with its [`Frozen`] shell, value-only
/// `PartialEq`, `Display` (the string representation) and a transparent
/// `serde::Serialize`. The hooks come from a hand-written [`ValueObject`]
/// implementation.
#[macro_export]
macro_rules! value_object {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($value:ty);) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name($crate::Validated<$name>);

        impl $crate::Frozen for $name {
            type Value = $value;
            const TYPE_NAME: &'static str = ::core::stringify!($name);

            fn from_validated(inner: $crate::Validated<$name>) -> Self {
                Self(inner)
            }

            fn validated(&self) -> &$crate::Validated<$name> {
                &self.0
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::Frozen::value(self) == $crate::Frozen::value(other)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::Frozen::to_string_representation(self))
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    $crate::Frozen::value(self),
                    serializer,
                )
            }
        }
    };
}
