//! Rule, message and attribute-name bags handed to a [`Validator`](crate::Validator).

use indexmap::IndexMap;

use crate::error::RuleParseError;
use crate::rule::{Rule, parse_spec};

/// Ordered mapping of field path → rules.
///
/// Paths are dotted (`address.city`) and may contain `*` segments that match
/// every key or index present in the data (`lines.*.sku`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rules(IndexMap<String, Vec<Rule>>);

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare typed rules for `path`, appending to any already declared.
    pub fn field(mut self, path: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.0.entry(path.into()).or_default().extend(rules);
        self
    }

    /// Declare rules for `path` from a `"required|string|min:5"` spec.
    pub fn parse_field(self, path: impl Into<String>, spec: &str) -> Result<Self, RuleParseError> {
        let rules = parse_spec(spec)?;
        Ok(self.field(path, rules))
    }

    /// Declare rules for `path` from individual tokens (`["string", "min:5"]`).
    pub fn parse_tokens<'a>(
        self,
        path: impl Into<String>,
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, RuleParseError> {
        let rules = tokens
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Rule>, _>>()?;
        Ok(self.field(path, rules))
    }

    pub fn get(&self, path: &str) -> Option<&[Rule]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Custom messages keyed by `"path.rule"` or by a bare `"rule"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages(IndexMap<String, String>);

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.0.insert(key.into(), message.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Most specific custom message for a failure of `rule` on `path`.
    ///
    /// Lookup order: concrete path, the wildcard pattern the path came from,
    /// then the bare rule name.
    pub fn lookup(&self, path: &str, pattern: &str, rule: &str) -> Option<&str> {
        self.get(&format!("{path}.{rule}"))
            .or_else(|| {
                if pattern != path {
                    self.get(&format!("{pattern}.{rule}"))
                } else {
                    None
                }
            })
            .or_else(|| self.get(rule))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Display names substituted for `:attribute`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeNames(IndexMap<String, String>);

impl AttributeNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.0.insert(path.into(), name.into());
        self
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Name shown in messages: custom name for the path or its pattern, else
    /// the path with underscores turned into spaces.
    pub fn display(&self, path: &str, pattern: &str) -> String {
        self.get(path)
            .or_else(|| self.get(pattern))
            .map(str::to_string)
            .unwrap_or_else(|| path.replace('_', " "))
    }
}
