//! Rule vocabulary understood by the built-in validator.

use core::fmt;
use core::str::FromStr;

use crate::error::RuleParseError;

/// A single validation predicate.
///
/// Rules are written either as typed values (`Rule::Min(5.0)`) or as the
/// familiar string tokens (`"min:5"`), which parse into the same variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Field must be present and non-empty. The only implicit rule: it runs
    /// even when the field is missing.
    Required,
    /// A `null` value skips the remaining rules of the field.
    Nullable,
    /// Stop validating the field after its first failure.
    Bail,
    String,
    /// Sequence or map.
    Array,
    Numeric,
    Integer,
    Boolean,
    Email,
    /// Lower size bound (numeric value, element count or character count).
    Min(f64),
    /// Upper size bound, measured like [`Rule::Min`].
    Max(f64),
    /// Value must equal one of the listed options.
    In(Vec<String>),
}

impl Rule {
    /// Rule name as used in message keys (`"email.min"`).
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Nullable => "nullable",
            Rule::Bail => "bail",
            Rule::String => "string",
            Rule::Array => "array",
            Rule::Numeric => "numeric",
            Rule::Integer => "integer",
            Rule::Boolean => "boolean",
            Rule::Email => "email",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::In(_) => "in",
        }
    }

    /// Implicit rules run even when the field is absent or blank.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Rule::Required)
    }

    /// Marker rules change how other rules run but never fail themselves.
    pub fn is_marker(&self) -> bool {
        matches!(self, Rule::Nullable | Rule::Bail)
    }

    /// Size rules pick their message variant from the field's declared type.
    pub fn is_size(&self) -> bool {
        matches!(self, Rule::Min(_) | Rule::Max(_))
    }

    /// Rules that make size rules measure the numeric value itself.
    pub fn is_numeric_kind(&self) -> bool {
        matches!(self, Rule::Numeric | Rule::Integer)
    }
}

/// Render a size limit without a trailing `.0` for whole numbers.
pub(crate) fn format_limit(limit: f64) -> String {
    if limit.fract() == 0.0 && limit.abs() < 1e15 {
        format!("{}", limit as i64)
    } else {
        format!("{limit}")
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Min(n) => write!(f, "min:{}", format_limit(*n)),
            Rule::Max(n) => write!(f, "max:{}", format_limit(*n)),
            Rule::In(options) => write!(f, "in:{}", options.join(",")),
            other => f.write_str(other.name()),
        }
    }
}

fn parse_limit(token: &str, rule: &'static str, param: Option<&str>) -> Result<f64, RuleParseError> {
    let param = param
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| RuleParseError::missing_parameter(rule))?;
    param
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RuleParseError::invalid_parameter(token))
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let (name, param) = match token.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param)),
            None => (token, None),
        };

        let rule = match name.to_ascii_lowercase().as_str() {
            "required" => Rule::Required,
            "nullable" => Rule::Nullable,
            "bail" => Rule::Bail,
            "string" => Rule::String,
            "array" => Rule::Array,
            "numeric" => Rule::Numeric,
            "integer" => Rule::Integer,
            "boolean" => Rule::Boolean,
            "email" => Rule::Email,
            "min" => Rule::Min(parse_limit(token, "min", param)?),
            "max" => Rule::Max(parse_limit(token, "max", param)?),
            "in" => {
                let options: Vec<String> = param
                    .map(|p| p.split(',').map(|o| o.trim().to_string()).collect())
                    .unwrap_or_default();
                if options.is_empty() || options.iter().all(String::is_empty) {
                    return Err(RuleParseError::missing_parameter("in"));
                }
                Rule::In(options)
            }
            "" => return Err(RuleParseError::Empty),
            _ => return Err(RuleParseError::unknown(name)),
        };

        Ok(rule)
    }
}

/// Parse a pipe-delimited rule list such as `"required|string|min:5"`.
pub fn parse_spec(spec: &str) -> Result<Vec<Rule>, RuleParseError> {
    spec.split('|')
        .filter(|t| !t.trim().is_empty())
        .map(str::parse)
        .collect()
}
