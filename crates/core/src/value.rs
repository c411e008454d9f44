//! Helpers for inspecting dynamic values
//!
//! Native and foreign values are both carried as [`serde_json::Value`]. These
//! helpers give rules a shared vocabulary for truthiness, size, kind, and
//! human-facing rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Broad category of a dynamic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    /// Any number, integral or not
    Number,
    /// A number representable as `i64` or `u64`
    Integer,
    /// A number only representable as `f64`
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Most specific kind of the given value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Whether a value belongs to this kind. `Number` accepts both integers and floats.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::Number => value.is_number(),
            kind => *kind == Self::of(value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Truthiness: null, `false`, zero, and empty strings or collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Length of a measurable value (strings count characters, collections count entries).
pub fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// Plain rendering: strings without quotes, null as `None`, everything else as JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Quoted rendering used for `{!r}` template conversions.
pub fn repr(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        other => display(other),
    }
}

/// Order two values of the same comparable kind (numbers or strings).
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return Some(a.cmp(&b));
            }
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        let falsy = [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ];
        for value in falsy {
            assert!(!is_truthy(&value), "{} should be falsy", value);
        }

        let truthy = [
            json!(true),
            json!(1),
            json!(-0.5),
            json!("x"),
            json!([0]),
            json!({"a": null}),
        ];
        for value in truthy {
            assert!(is_truthy(&value), "{} should be truthy", value);
        }
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure(&json!("Zoë")), Some(3));
        assert_eq!(measure(&json!([1, 2])), Some(2));
        assert_eq!(measure(&json!({"a": 1})), Some(1));
        assert_eq!(measure(&json!(12)), None);
        assert_eq!(measure(&json!(null)), None);
    }

    #[test]
    fn test_kind_matching() {
        assert_eq!(ValueKind::of(&json!(1)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Float);
        assert!(ValueKind::Number.matches(&json!(1)));
        assert!(ValueKind::Number.matches(&json!(1.5)));
        assert!(!ValueKind::Integer.matches(&json!(1.5)));
        assert!(ValueKind::String.matches(&json!("a")));
    }

    #[test]
    fn test_rendering() {
        assert_eq!(display(&json!("foo")), "foo");
        assert_eq!(repr(&json!("foo")), "'foo'");
        assert_eq!(display(&json!(null)), "None");
        assert_eq!(display(&json!([1, "a"])), "[1,\"a\"]");
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(&json!(1), &json!(2)), Some(Ordering::Less));
        assert_eq!(compare(&json!(2.5), &json!(2)), Some(Ordering::Greater));
        assert_eq!(compare(&json!("b"), &json!("a")), Some(Ordering::Greater));
        assert_eq!(compare(&json!("b"), &json!(1)), None);
    }
}
