//! Validator contract and the built-in rule engine.

use std::sync::Arc;

use serde_json::Value;

use crate::checks::{is_validatable, passes};
use crate::error::{ValidationError, ValidationErrors};
use crate::messages::{SizeKind, default_template, render};
use crate::path::{expand, lookup};
use crate::rule::Rule;
use crate::rules::{AttributeNames, Messages, Rules};

/// Checks a data bag against a rule bag.
///
/// On failure the returned [`ValidationError`] carries every failing path with
/// its messages in declaration order.
pub trait Validator: Send + Sync {
    fn validate(
        &self,
        data: &Value,
        rules: &Rules,
        messages: &Messages,
        attributes: &AttributeNames,
    ) -> Result<(), ValidationError>;
}

impl<V> Validator for &V
where
    V: Validator + ?Sized,
{
    fn validate(
        &self,
        data: &Value,
        rules: &Rules,
        messages: &Messages,
        attributes: &AttributeNames,
    ) -> Result<(), ValidationError> {
        (**self).validate(data, rules, messages, attributes)
    }
}

impl<V> Validator for Arc<V>
where
    V: Validator + ?Sized,
{
    fn validate(
        &self,
        data: &Value,
        rules: &Rules,
        messages: &Messages,
        attributes: &AttributeNames,
    ) -> Result<(), ValidationError> {
        (**self).validate(data, rules, messages, attributes)
    }
}

/// Environment variable enabling stop-at-first-failure for every field.
pub const BAIL_ENV: &str = "VALCAST_VALIDATION_BAIL";

/// Engine-wide switches.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Behave as if every field declared `bail`.
    pub bail: bool,
}

impl ValidatorConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let bail = std::env::var(BAIL_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { bail }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Built-in rule engine.
#[derive(Debug, Clone, Default)]
pub struct RuleValidator {
    config: ValidatorConfig,
}

impl RuleValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::with_config(ValidatorConfig::from_env())
    }

    pub fn config(&self) -> ValidatorConfig {
        self.config
    }

    #[allow(clippy::too_many_arguments)]
    fn validate_field(
        &self,
        data: &Value,
        path: &str,
        pattern: &str,
        field_rules: &[Rule],
        messages: &Messages,
        attributes: &AttributeNames,
        errors: &mut ValidationErrors,
    ) {
        let value = lookup(data, path);
        let bail = self.config.bail || field_rules.contains(&Rule::Bail);
        let nullable = field_rules.contains(&Rule::Nullable);
        let kind = SizeKind::of(field_rules);

        for rule in field_rules.iter().filter(|r| !r.is_marker()) {
            if !is_validatable(rule, value, nullable) {
                continue;
            }
            if passes(rule, value, field_rules) {
                continue;
            }

            let template = messages
                .lookup(path, pattern, rule.name())
                .unwrap_or_else(|| default_template(rule, kind));
            let attribute = attributes.display(path, pattern);
            errors.add(path, render(template, &attribute, rule));

            if bail || rule.is_implicit() {
                break;
            }
        }
    }
}

impl Validator for RuleValidator {
    fn validate(
        &self,
        data: &Value,
        rules: &Rules,
        messages: &Messages,
        attributes: &AttributeNames,
    ) -> Result<(), ValidationError> {
        let mut errors = ValidationErrors::new();

        for (pattern, field_rules) in rules.iter() {
            for path in expand(data, pattern) {
                self.validate_field(
                    data,
                    &path,
                    pattern,
                    field_rules,
                    messages,
                    attributes,
                    &mut errors,
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failed_fields = errors.len(), "validation failed");
            Err(ValidationError::new(errors))
        }
    }
}
