//! Validation error model.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// A rule token that could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("empty rule token")]
    Empty,

    #[error("unknown validation rule `{0}`")]
    Unknown(String),

    #[error("rule `{0}` requires a parameter")]
    MissingParameter(&'static str),

    #[error("invalid rule parameter in `{0}`")]
    InvalidParameter(String),
}

impl RuleParseError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown(name.into())
    }

    pub fn missing_parameter(rule: &'static str) -> Self {
        Self::MissingParameter(rule)
    }

    pub fn invalid_parameter(token: impl Into<String>) -> Self {
        Self::InvalidParameter(token.into())
    }
}

/// Field path → ordered list of human-readable messages.
///
/// Paths appear in the order their first failure was recorded; messages per
/// path keep the order of the rules that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Messages recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// First message recorded for `path`.
    pub fn first(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn has(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Number of failing paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every message, flattened in recording order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

/// Data rejected by its declared rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("The given data was invalid.")]
pub struct ValidationError {
    errors: ValidationErrors,
}

impl ValidationError {
    pub fn new(errors: ValidationErrors) -> Self {
        Self { errors }
    }

    /// Field path → messages mapping.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::new(errors)
    }
}
