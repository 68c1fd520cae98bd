//! End-to-end: a record with value-object fields, persisted and re-read.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use valcast_cast::{Attributes, CastError, CastRegistry, ModelSchema, Record};
use valcast_catalog::{Address, AddressParts, Email, RomanNumber};
use valcast_core::{Frozen, ValueObject};

const ADDRESS_JSON: &str =
    r#"{"country":"Russia","city":"Moscow","street":"Red Square","number":"1"}"#;

fn account_schema() -> Result<Arc<ModelSchema>> {
    let registry = CastRegistry::new().with::<Email>().with::<Address>();
    let schema = ModelSchema::new("Account")
        .cast_named(&registry, "email", "Email")?
        .cast_named(&registry, "address", "Address")?;
    Ok(Arc::new(schema))
}

fn address_parts() -> AddressParts {
    json!({"country": "Russia", "city": "Moscow", "street": "Red Square", "number": "1"})
        .as_object()
        .cloned()
        .unwrap_or_default()
}

fn new_account(schema: Arc<ModelSchema>) -> Result<(Record, Email, Address)> {
    let email = Email::create(" test@gmail.com ".into(), None)?;
    let address = Address::create(address_parts(), None)?;

    let mut record = Record::new(schema);
    record.set_raw("name", "Example Test");
    record.set("email", &email)?;
    record.set("address", &address)?;
    Ok((record, email, address))
}

#[test]
fn stores_cells_in_their_persisted_form() -> Result<()> {
    valcast_observability::init_for_tests();

    let (record, _, _) = new_account(account_schema()?)?;

    assert_eq!(record.raw("name"), Some(&json!("Example Test")));
    assert_eq!(record.raw("email"), Some(&json!("test@gmail.com")));
    assert_eq!(record.raw("address"), Some(&json!(ADDRESS_JSON)));
    Ok(())
}

#[test]
fn fresh_record_reads_back_equal_value_objects() -> Result<()> {
    valcast_observability::init_for_tests();

    let schema = account_schema()?;
    let (record, email, address) = new_account(schema.clone())?;

    let fresh = Record::from_attributes(schema, record.clone().into_attributes());

    let fresh_email: Email = fresh.get("email")?;
    let fresh_address: Address = fresh.get("address")?;
    assert_eq!(fresh_email, email);
    assert_eq!(fresh_address, address);
    assert_eq!(fresh_email.key(), "email");
    assert_eq!(fresh_address.city(), Some("Moscow"));

    // Both reads see the same stored state.
    let original_email: Email = record.get("email")?;
    assert_eq!(original_email, fresh_email);
    Ok(())
}

#[test]
fn hydrates_from_database_shaped_rows() -> Result<()> {
    valcast_observability::init_for_tests();

    let mut row = Attributes::new();
    row.insert("name".into(), json!("Example Test"));
    row.insert("email".into(), json!("test@gmail.com"));
    row.insert("address".into(), json!(ADDRESS_JSON));

    let record = Record::from_attributes(account_schema()?, row);
    let address: Address = record.get("address")?;
    assert_eq!(address.to_json()?, ADDRESS_JSON);
    assert_eq!(address.number().as_deref(), Some("1"));
    Ok(())
}

#[test]
fn rejects_value_object_of_another_type() -> Result<()> {
    valcast_observability::init_for_tests();

    let (mut record, _, _) = new_account(account_schema()?)?;
    let roman = RomanNumber::create(12u32.into(), None)?;

    let err = record.set("email", &roman).unwrap_err();
    assert!(matches!(err, CastError::InvalidType { .. }));
    assert_eq!(
        err.to_string(),
        "The Eloquent Model \"Account\" must use the type \"Email\" specified in casts -> email"
    );
    assert_eq!(record.raw("email"), Some(&json!("test@gmail.com")));
    Ok(())
}

#[test]
fn corrupt_stored_cell_fails_to_read() -> Result<()> {
    valcast_observability::init_for_tests();

    let mut row = Attributes::new();
    row.insert("email".into(), json!("not-an-email"));
    let record = Record::from_attributes(account_schema()?, row);

    let err = record.get::<Email>("email").unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(
        validation.errors().first("email"),
        Some("The email must be a valid email address.")
    );
    Ok(())
}

#[test]
fn records_are_shareable_across_threads() -> Result<()> {
    valcast_observability::init_for_tests();

    let (record, email, _) = new_account(account_schema()?)?;
    let record = Arc::new(record);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let record = Arc::clone(&record);
            std::thread::spawn(move || record.get::<Email>("email"))
        })
        .collect();

    for handle in handles {
        let read = handle.join().expect("reader thread panicked")?;
        assert_eq!(read, email);
    }
    Ok(())
}
