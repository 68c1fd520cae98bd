//! `valcast-validation`: rule-based validation of JSON data bags.
//!
//! Callers describe what a bag must look like with [`Rules`] (field path →
//! [`Rule`] list), optional custom [`Messages`] and [`AttributeNames`], and
//! hand everything to a [`Validator`]. [`RuleValidator`] is the built-in
//! engine.

pub mod checks;
pub mod error;
pub mod messages;
pub mod path;
pub mod rule;
pub mod rules;
pub mod validator;

pub use error::{RuleParseError, ValidationError, ValidationErrors};
pub use rule::{Rule, parse_spec};
pub use rules::{AttributeNames, Messages, Rules};
pub use validator::{BAIL_ENV, RuleValidator, Validator, ValidatorConfig};
