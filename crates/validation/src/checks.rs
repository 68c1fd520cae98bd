//! Rule predicates over JSON values.

use serde_json::Value;

use crate::messages::SizeKind;
use crate::rule::Rule;

/// Whether `value` passes `rule`. `field_rules` are all rules declared for the
/// field; size rules need them to decide what to measure.
pub fn passes(rule: &Rule, value: Option<&Value>, field_rules: &[Rule]) -> bool {
    match rule {
        Rule::Required => value.is_some_and(is_filled),
        Rule::Nullable | Rule::Bail => true,
        Rule::String => matches!(value, Some(Value::String(_))),
        Rule::Array => matches!(value, Some(Value::Array(_) | Value::Object(_))),
        Rule::Numeric => value.is_some_and(is_numeric),
        Rule::Integer => value.is_some_and(is_integer),
        Rule::Boolean => value.is_some_and(is_boolean),
        Rule::Email => matches!(value, Some(Value::String(s)) if is_email(s)),
        Rule::Min(min) => size(value, field_rules).is_some_and(|s| s >= *min),
        Rule::Max(max) => size(value, field_rules).is_some_and(|s| s <= *max),
        Rule::In(options) => value
            .and_then(scalar_text)
            .is_some_and(|text| options.iter().any(|o| *o == text)),
    }
}

/// Whether a non-implicit rule should run for this value at all.
pub fn is_validatable(rule: &Rule, value: Option<&Value>, nullable: bool) -> bool {
    if rule.is_implicit() {
        return true;
    }
    match value {
        None => false,
        Some(Value::String(s)) if s.trim().is_empty() => false,
        Some(Value::Null) if nullable => false,
        Some(_) => true,
    }
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    // `f64::from_str` also accepts spellings such as "inf" and "NaN".
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

fn is_numeric(value: &Value) -> bool {
    numeric_value(value).is_some()
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        Value::String(s) => {
            let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(n) => n.as_i64().is_some_and(|i| i == 0 || i == 1),
        Value::String(s) => s == "0" || s == "1",
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

/// Size of a value as seen by `min`/`max`.
pub fn size(value: Option<&Value>, field_rules: &[Rule]) -> Option<f64> {
    let value = value?;
    if SizeKind::of(field_rules) == SizeKind::Numeric {
        if let Some(n) = numeric_value(value) {
            return Some(n);
        }
    }
    match value {
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Number(n) => Some(n.to_string().chars().count() as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
    }
}

const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

fn is_dot_atom(part: &str, allowed: impl Fn(char) -> bool) -> bool {
    !part.is_empty() && part.split('.').all(|atom| !atom.is_empty() && atom.chars().all(&allowed))
}

/// Address check in the spirit of RFC 5322 dot-atom syntax: one `@`, a local
/// part of atext atoms and a domain of hostname labels.
pub fn is_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.rsplit_once('@') else {
        return false;
    };
    if local.len() > 64 || domain.len() > 255 || local.contains('@') {
        return false;
    }

    let local_ok = is_dot_atom(local, |c| {
        c.is_alphanumeric() || LOCAL_SPECIALS.contains(c)
    });
    let domain_ok = is_dot_atom(domain, |c| c.is_alphanumeric() || c == '-')
        && domain
            .split('.')
            .all(|label| label.len() <= 63 && !label.starts_with('-') && !label.ends_with('-'));

    local_ok && domain_ok
}
