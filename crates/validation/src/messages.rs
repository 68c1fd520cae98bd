//! Default English wording and placeholder substitution.

use crate::rule::{Rule, format_limit};

/// How a size rule measures its field, decided by the field's declared rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SizeKind {
    Numeric,
    Array,
    String,
}

impl SizeKind {
    pub fn of(rules: &[Rule]) -> Self {
        if rules.iter().any(Rule::is_numeric_kind) {
            SizeKind::Numeric
        } else if rules.contains(&Rule::Array) {
            SizeKind::Array
        } else {
            SizeKind::String
        }
    }
}

/// Default message template for a failed rule.
pub fn default_template(rule: &Rule, kind: SizeKind) -> &'static str {
    match (rule, kind) {
        (Rule::Required, _) => "The :attribute field is required.",
        (Rule::String, _) => "The :attribute must be a string.",
        (Rule::Array, _) => "The :attribute must be an array.",
        (Rule::Numeric, _) => "The :attribute must be a number.",
        (Rule::Integer, _) => "The :attribute must be an integer.",
        (Rule::Boolean, _) => "The :attribute field must be true or false.",
        (Rule::Email, _) => "The :attribute must be a valid email address.",
        (Rule::In(_), _) => "The selected :attribute is invalid.",
        (Rule::Min(_), SizeKind::Numeric) => "The :attribute must be at least :min.",
        (Rule::Min(_), SizeKind::Array) => "The :attribute must have at least :min items.",
        (Rule::Min(_), SizeKind::String) => "The :attribute must be at least :min characters.",
        (Rule::Max(_), SizeKind::Numeric) => "The :attribute may not be greater than :max.",
        (Rule::Max(_), SizeKind::Array) => "The :attribute may not have more than :max items.",
        (Rule::Max(_), SizeKind::String) => {
            "The :attribute may not be greater than :max characters."
        }
        (Rule::Nullable | Rule::Bail, _) => "The :attribute is invalid.",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fill `:attribute` (and its `:Attribute` / `:ATTRIBUTE` forms) plus the
/// rule parameters into `template`.
pub fn render(template: &str, attribute: &str, rule: &Rule) -> String {
    let mut message = template
        .replace(":ATTRIBUTE", &attribute.to_uppercase())
        .replace(":Attribute", &capitalize(attribute))
        .replace(":attribute", attribute);

    match rule {
        Rule::Min(n) => message = message.replace(":min", &format_limit(*n)),
        Rule::Max(n) => message = message.replace(":max", &format_limit(*n)),
        Rule::In(options) => message = message.replace(":values", &options.join(", ")),
        _ => {}
    }

    message
}
