//! # Data Binding
//!
//! Resolves references like `$.sales.regions[0].name` against the document's
//! data context. A reference that doesn't lead anywhere resolves to
//! `Value::Null`: missing keys, out-of-range indices, indexing into a scalar
//! and malformed brackets are all treated as "no data", never as errors, so
//! a dashboard with partial data still renders.

use serde_json::{Map, Value};

/// One navigation step in a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Split a path into segments. `None` means the path is malformed.
///
/// The root symbol and a single leading dot are stripped first, so `$`, `$.`
/// and `.` all address the whole context.
fn parse_path(path: &str) -> Option<Vec<Segment<'_>>> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);

    let mut segments = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let close = after.find(']')?;
            // Negative or non-numeric indices never match anything.
            let idx: usize = after[..close].trim().parse().ok()?;
            segments.push(Segment::Index(idx));
            rest = &after[close + 1..];
        } else if let Some(after) = rest.strip_prefix('.') {
            rest = after;
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            segments.push(Segment::Key(&rest[..end]));
            rest = &rest[end..];
        }
    }
    Some(segments)
}

/// Walk a JSON value by parsed segments.
fn traverse<'a>(value: &'a Value, segments: &[Segment<'_>]) -> Option<&'a Value> {
    let mut current = value;
    for segment in segments {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(*key)?,
            (Segment::Index(idx), Value::Array(arr)) => arr.get(*idx)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Resolve a path such as `$.a.b[0].c` against `data`.
///
/// An empty path resolves to `Null`; `"$"` resolves to the whole context.
pub fn resolve_path(path: &str, data: &Value) -> Value {
    if path.is_empty() {
        return Value::Null;
    }
    parse_path(path)
        .and_then(|segments| traverse(data, &segments))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Whether a string is a reference rather than a literal.
pub fn is_reference(s: &str) -> bool {
    s.starts_with('$') || s.starts_with('.')
}

/// The path of an explicit `{"$": path}` or `{"ref": path}` object.
fn explicit_ref(map: &Map<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    map.get("$")
        .or_else(|| map.get("ref"))
        .and_then(Value::as_str)
}

/// Resolve a field value that may be a literal or a reference.
///
/// - strings starting with `$` or `.` are references, other strings literals;
/// - `{"$": path}` and `{"ref": path}` are explicit references;
/// - arrays resolve element-wise and other objects value-wise;
/// - numbers, booleans and null pass through.
pub fn resolve(reference: &Value, data: &Value) -> Value {
    match reference {
        Value::String(s) if is_reference(s) => resolve_path(s, data),
        Value::Object(map) => match explicit_ref(map) {
            Some(path) => resolve_path(path, data),
            None => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), resolve(v, data)))
                    .collect(),
            ),
        },
        Value::Array(items) => Value::Array(items.iter().map(|v| resolve(v, data)).collect()),
        other => other.clone(),
    }
}

/// Resolve an optional field. A missing field is `Null`.
pub fn resolve_opt(reference: Option<&Value>, data: &Value) -> Value {
    reference.map(|r| resolve(r, data)).unwrap_or(Value::Null)
}

/// The string a widget shows for a resolved value.
///
/// `Null` is empty, whole floats print without a fractional part, strings
/// print without quotes, and containers print as compact JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_path_with_index() {
        let data = json!({"a": {"b": [{"c": 1}]}});
        assert_eq!(resolve_path("$.a.b[0].c", &data), json!(1));
    }

    #[test]
    fn missing_segments_are_null() {
        let data = json!({"a": {"b": [1, 2]}});
        assert_eq!(resolve_path("$.missing.x", &data), Value::Null);
        assert_eq!(resolve_path("$.a.b[5]", &data), Value::Null);
        assert_eq!(resolve_path("$.a.b[0].c", &data), Value::Null);
        assert_eq!(resolve_path("$.a[0]", &data), Value::Null);
    }

    #[test]
    fn malformed_brackets_are_null() {
        let data = json!({"a": [1, 2]});
        assert_eq!(resolve_path("$.a[0", &data), Value::Null);
        assert_eq!(resolve_path("$.a[x]", &data), Value::Null);
        assert_eq!(resolve_path("$.a[-1]", &data), Value::Null);
    }

    #[test]
    fn root_forms() {
        let data = json!({"k": "v"});
        assert_eq!(resolve_path("$", &data), data);
        assert_eq!(resolve_path(".k", &data), json!("v"));
        assert_eq!(resolve_path("k", &data), json!("v"));
        assert_eq!(resolve_path("", &data), Value::Null);
    }

    #[test]
    fn chained_indices() {
        let data = json!({"m": [[1, 2], [3, 4]]});
        assert_eq!(resolve_path("$.m[1][0]", &data), json!(3));
    }

    #[test]
    fn resolve_literals_and_refs() {
        let data = json!({"name": "North", "n": 3});
        assert_eq!(resolve(&json!("plain"), &data), json!("plain"));
        assert_eq!(resolve(&json!("$.name"), &data), json!("North"));
        assert_eq!(resolve(&json!({"$": "$.n"}), &data), json!(3));
        assert_eq!(resolve(&json!({"ref": ".n"}), &data), json!(3));
        assert_eq!(resolve(&json!(42), &data), json!(42));
    }

    #[test]
    fn resolve_recurses_into_containers() {
        let data = json!({"a": 1, "b": 2});
        assert_eq!(resolve(&json!(["$.a", "x", "$.b"]), &data), json!([1, "x", 2]));
        assert_eq!(
            resolve(&json!({"first": "$.a", "label": "L"}), &data),
            json!({"first": 1, "label": "L"})
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(display(&Value::Null), "");
        assert_eq!(display(&json!("x")), "x");
        assert_eq!(display(&json!(12)), "12");
        assert_eq!(display(&json!(12.0)), "12");
        assert_eq!(display(&json!(12.5)), "12.5");
        assert_eq!(display(&json!(true)), "true");
    }
}
