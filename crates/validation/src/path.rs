//! Dotted field paths over a JSON data bag.

use serde_json::Value;

/// Resolve `a.b.0.c` inside `data`. Numeric segments index into arrays.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Expand `*` segments against the keys and indices present in `data`.
///
/// A pattern without wildcards expands to itself, whether or not the field
/// exists. A wildcard over a missing or scalar node expands to nothing.
pub fn expand(data: &Value, pattern: &str) -> Vec<String> {
    if !pattern.split('.').any(|s| s == "*") {
        return vec![pattern.to_string()];
    }

    let segments: Vec<&str> = pattern.split('.').collect();
    let mut out = Vec::new();
    expand_into(Some(data), &segments, String::new(), &mut out);
    out
}

fn expand_into(node: Option<&Value>, rest: &[&str], prefix: String, out: &mut Vec<String>) {
    let Some((head, tail)) = rest.split_first() else {
        out.push(prefix);
        return;
    };

    let join = |segment: &str| {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{prefix}.{segment}")
        }
    };

    if *head == "*" {
        match node {
            Some(Value::Object(map)) => {
                for (key, child) in map {
                    expand_into(Some(child), tail, join(key.as_str()), out);
                }
            }
            Some(Value::Array(items)) => {
                for (index, child) in items.iter().enumerate() {
                    expand_into(Some(child), tail, join(index.to_string().as_str()), out);
                }
            }
            _ => {}
        }
        return;
    }

    let child = match node {
        Some(Value::Object(map)) => map.get(*head),
        Some(Value::Array(items)) => head.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    };
    expand_into(child, tail, join(*head), out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn looks_up_nested_objects_and_arrays() {
        let data = json!({"address": {"city": "Moscow"}, "tags": ["a", "b"]});
        assert_eq!(lookup(&data, "address.city"), Some(&json!("Moscow")));
        assert_eq!(lookup(&data, "tags.1"), Some(&json!("b")));
        assert_eq!(lookup(&data, "tags.9"), None);
        assert_eq!(lookup(&data, "address.city.name"), None);
        assert_eq!(lookup(&data, "missing"), None);
    }

    #[test]
    fn plain_patterns_expand_to_themselves() {
        let data = json!({});
        assert_eq!(expand(&data, "address.city"), vec!["address.city"]);
    }

    #[test]
    fn wildcards_expand_over_present_keys() {
        let data = json!({"lines": [{"sku": "A"}, {"sku": "B"}], "meta": {"x": 1, "y": 2}});
        assert_eq!(expand(&data, "lines.*.sku"), vec!["lines.0.sku", "lines.1.sku"]);
        assert_eq!(expand(&data, "meta.*"), vec!["meta.x", "meta.y"]);
    }

    #[test]
    fn wildcard_over_missing_node_expands_to_nothing() {
        let data = json!({"lines": "scalar"});
        assert!(expand(&data, "lines.*.sku").is_empty());
        assert!(expand(&data, "nothing.*").is_empty());
    }
}
