//! Default value-object keys.

/// Snake-case a type name: `EmailAddress` → `email_address`.
///
/// Every upper-case letter that follows another character gets an underscore
/// in front of it, so acronyms split per letter (`HTMLParser` →
/// `h_t_m_l_parser`). Whitespace-separated words are joined the same way.
/// Module prefixes (`crate::values::Email`) and generic arguments are dropped.
pub fn snake_case(type_name: &str) -> String {
    let base = base_name(type_name);
    if base.chars().all(|c| !c.is_uppercase() && !c.is_whitespace()) {
        return base.to_string();
    }

    let mut out = String::with_capacity(base.len() + 4);
    let mut previous: Option<char> = None;
    let mut start_word = true;

    for c in base.chars() {
        if c.is_whitespace() {
            start_word = true;
            continue;
        }
        let c = if start_word { c.to_uppercase().next().unwrap_or(c) } else { c };
        start_word = false;

        if c.is_uppercase() && previous.is_some() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
        previous = Some(c);
    }

    out
}

fn base_name(type_name: &str) -> &str {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim()
}

/// Key used when none is given at construction: the snake-cased type name.
pub fn default_key(type_name: &str) -> String {
    snake_case(type_name)
}

/// Resolve the construction key: a non-empty given key wins.
pub fn resolve_key(given: Option<&str>, type_name: &str) -> String {
    match given {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => default_key(type_name),
    }
}
