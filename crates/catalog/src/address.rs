use serde_json::{Map, Value};
use valcast_core::validation::{Rule, Rules};
use valcast_core::{
    Frozen, Persistence, Serializable, SerializationError, StoredValue, TransformError, ValueObject,
    value_object,
};

/// Address components, keyed by name.
pub type AddressParts = Map<String, Value>;

value_object! {
    /// A postal address. Lives in memory as a map of components and is stored
    /// as JSON text.
    pub struct Address(AddressParts);
}

impl Address {
    pub fn country(&self) -> Option<&str> {
        self.text("country")
    }

    pub fn city(&self) -> Option<&str> {
        self.text("city")
    }

    pub fn street(&self) -> Option<&str> {
        self.text("street")
    }

    /// House number as written, whether it was given as text or as a number.
    pub fn number(&self) -> Option<String> {
        match self.value().get("number")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn text(&self, component: &str) -> Option<&str> {
        self.value().get(component).and_then(Value::as_str)
    }
}

impl ValueObject for Address {
    type Input = AddressParts;

    fn transform_input(input: AddressParts) -> Result<AddressParts, TransformError> {
        Ok(input)
    }

    fn rules(key: &str) -> Rules {
        Rules::new()
            .field(key, [Rule::Required, Rule::Array])
            .field(format!("{key}.country"), [Rule::Required, Rule::String])
            .field(format!("{key}.city"), [Rule::Required, Rule::String])
            .field(format!("{key}.street"), [Rule::Required, Rule::String])
            .field(format!("{key}.number"), [Rule::Required, Rule::Numeric])
    }

    fn persistence() -> Option<Persistence<Self>> {
        Some(Persistence::custom())
    }
}

impl Serializable for Address {
    fn serialize(value: &AddressParts) -> Result<StoredValue, SerializationError> {
        Ok(StoredValue::String(serde_json::to_string(value)?))
    }

    fn unserialize(stored: StoredValue) -> Result<AddressParts, SerializationError> {
        match stored {
            StoredValue::String(text) => Ok(serde_json::from_str(&text)?),
            // JSON columns may already hand back decoded data.
            StoredValue::Object(parts) => Ok(parts),
            StoredValue::Null => Ok(AddressParts::new()),
            other => Err(SerializationError::new(format!(
                "expected address JSON text, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use valcast_core::ValueObjectError;

    fn red_square() -> AddressParts {
        json!({"country": "Russia", "city": "Moscow", "street": "Red Square", "number": "1"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn accepts_complete_address() {
        let address = Address::create(red_square(), None).unwrap();
        assert_eq!(address.key(), "address");
        assert_eq!(address.country(), Some("Russia"));
        assert_eq!(address.city(), Some("Moscow"));
        assert_eq!(address.street(), Some("Red Square"));
        assert_eq!(address.number().as_deref(), Some("1"));
    }

    #[test]
    fn reports_missing_and_malformed_components_by_path() {
        let mut parts = red_square();
        parts.remove("city");
        parts.insert("number".into(), json!("one"));

        let err = Address::create(parts, None).unwrap_err();
        let ValueObjectError::Validation(err) = err else {
            panic!("Expected Validation error");
        };
        assert_eq!(err.errors().first("address.city"), Some("The address.city field is required."));
        assert_eq!(err.errors().first("address.number"), Some("The address.number must be a number."));
        assert!(!err.errors().has("address.country"));
    }

    #[test]
    fn empty_address_is_required() {
        let err = Address::create(AddressParts::new(), None).unwrap_err();
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.errors().first("address"), Some("The address field is required."));
    }

    #[test]
    fn opts_in_to_custom_persistence() {
        assert!(Address::persistence().is_some());
    }

    #[test]
    fn nested_rules_follow_a_dotted_key() {
        let address = Address::create(red_square(), Some("billing.address")).unwrap();
        assert_eq!(address.city(), Some("Moscow"));

        let mut parts = red_square();
        parts.remove("street");
        let err = Address::create(parts, Some("billing.address")).unwrap_err();
        assert_eq!(
            err.as_validation().unwrap().errors().first("billing.address.street"),
            Some("The billing.address.street field is required.")
        );
    }

    #[test]
    fn serializes_to_json_text() {
        let address = Address::create(red_square(), None).unwrap();
        let stored = <Address as Serializable>::serialize(address.value()).unwrap();
        assert_eq!(
            stored,
            json!(r#"{"country":"Russia","city":"Moscow","street":"Red Square","number":"1"}"#)
        );
    }

    #[test]
    fn unserialize_accepts_text_objects_and_null() {
        let text = json!(r#"{"city":"Moscow"}"#);
        assert_eq!(
            <Address as Serializable>::unserialize(text).unwrap().get("city"),
            Some(&json!("Moscow"))
        );
        assert!(<Address as Serializable>::unserialize(json!({"city": "Moscow"})).is_ok());
        assert!(<Address as Serializable>::unserialize(json!(null)).unwrap().is_empty());
        assert!(<Address as Serializable>::unserialize(json!(42)).is_err());
        assert!(<Address as Serializable>::unserialize(json!("{broken")).is_err());
    }

    #[test]
    fn json_and_string_forms_are_compact_json() {
        let address = Address::create(red_square(), None).unwrap();
        let expected = r#"{"country":"Russia","city":"Moscow","street":"Red Square","number":"1"}"#;
        assert_eq!(address.to_json().unwrap(), expected);
        assert_eq!(address.to_string(), expected);
    }

    #[test]
    fn round_trip_through_storage_is_lossless() {
        let address = Address::create(red_square(), None).unwrap();
        let stored = <Address as Serializable>::serialize(address.value()).unwrap();
        let input = <Address as Serializable>::unserialize(stored).unwrap();
        let restored = Address::create(input, None).unwrap();
        assert_eq!(restored, address);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: unserialize(serialize(v)) rebuilds an equal address.
            #[test]
            fn storage_round_trip(
                country in "[A-Za-z ]{1,20}[A-Za-z]",
                city in "[A-Za-z]{1,20}",
                street in "[A-Za-z0-9 ]{0,30}[A-Za-z]",
                number in 1u32..10_000,
            ) {
                let parts = json!({
                    "country": country,
                    "city": city,
                    "street": street,
                    "number": number.to_string(),
                })
                .as_object()
                .cloned()
                .unwrap();

                let address = Address::create(parts, None).unwrap();
                let stored = <Address as Serializable>::serialize(address.value()).unwrap();
                let restored = Address::create(<Address as Serializable>::unserialize(stored).unwrap(), None).unwrap();
                prop_assert_eq!(restored, address);
            }
        }
    }
}
