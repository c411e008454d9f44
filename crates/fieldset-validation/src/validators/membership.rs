//! Membership and equality validators

use fieldset_core::{Concern, Context, Deferred, ValidationResult, Validator};
use serde_json::{json, Value};
use std::collections::HashSet;

/// The value must be one of a set of choices.
///
/// Choices may be produced on demand. Labelled choices compare on the value
/// only; labels are kept for consumers such as form renderers. No choices, or
/// an empty list, allows everything.
#[derive(Debug, Clone, Default)]
pub struct In {
    choices: Option<Deferred<Vec<Value>>>,
    labels: Vec<String>,
}

impl In {
    pub fn new<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            choices: Some(Deferred::Literal(choices.into_iter().map(Into::into).collect())),
            labels: Vec::new(),
        }
    }

    /// Choices given as `(value, label)` pairs
    pub fn labelled<I, V, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<Value>,
        L: Into<String>,
    {
        let (choices, labels): (Vec<Value>, Vec<String>) = pairs
            .into_iter()
            .map(|(value, label)| (value.into(), label.into()))
            .unzip();

        Self {
            choices: Some(Deferred::Literal(choices)),
            labels,
        }
    }

    /// Choices computed each time a value is validated
    pub fn from_fn<F>(choices: F) -> Self
    where
        F: Fn() -> Vec<Value> + Send + Sync + 'static,
    {
        Self {
            choices: Some(Deferred::factory(choices)),
            labels: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Validator for In {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let choices = match &self.choices {
            Some(choices) => choices.resolve(),
            None => return Ok(value),
        };

        if choices.is_empty() || choices.contains(&value) {
            Ok(value)
        } else {
            Err(Concern::new("Value is not in allowed list."))
        }
    }

    fn rule_name(&self) -> &'static str {
        "in"
    }

    fn parameters(&self) -> Option<Value> {
        self.choices
            .as_ref()
            .map(|choices| json!({ "choices": choices.resolve() }))
    }
}

/// The value must contain a target: a substring of a string, an element of an
/// array, or a key of an object.
#[derive(Debug, Clone, Default)]
pub struct Contains {
    target: Option<Deferred<Value>>,
}

impl Contains {
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: Some(Deferred::Literal(target.into())),
        }
    }

    pub fn from_fn<F>(target: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            target: Some(Deferred::factory(target)),
        }
    }
}

fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::String(text), Value::String(part)) => text.contains(part.as_str()),
        (Value::Array(items), needle) => items.contains(needle),
        (Value::Object(map), Value::String(key)) => map.contains_key(key),
        _ => false,
    }
}

impl Validator for Contains {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let target = match &self.target {
            Some(target) => target.resolve(),
            None => return Ok(value),
        };

        if contains(&value, &target) {
            Ok(value)
        } else {
            Err(Concern::new("Value does not contain: {0}").arg(target))
        }
    }

    fn rule_name(&self) -> &'static str {
        "contains"
    }
}

/// The value must equal a target. A null target is a real comparison value.
#[derive(Debug, Clone, Default)]
pub struct Equal {
    target: Option<Deferred<Value>>,
}

impl Equal {
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: Some(Deferred::Literal(target.into())),
        }
    }

    pub fn from_fn<F>(target: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            target: Some(Deferred::factory(target)),
        }
    }
}

impl Validator for Equal {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let target = match &self.target {
            Some(target) => target.resolve(),
            None => return Ok(value),
        };

        if value == target {
            Ok(value)
        } else {
            Err(Concern::new("Value does not equal: {0}").arg(target))
        }
    }

    fn rule_name(&self) -> &'static str {
        "equal"
    }
}

/// Every element must be distinct: array elements, object values, or the
/// characters of a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unique;

impl Validator for Unique {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let keys: Vec<String> = match &value {
            Value::Array(items) => items.iter().map(Value::to_string).collect(),
            Value::Object(map) => map.values().map(Value::to_string).collect(),
            Value::String(text) => text.chars().map(String::from).collect(),
            _ => return Err(Concern::new("Value must be iterable.")),
        };

        let distinct: HashSet<&String> = keys.iter().collect();
        if distinct.len() == keys.len() {
            Ok(value)
        } else {
            Err(Concern::new("Not all values are unique."))
        }
    }

    fn rule_name(&self) -> &'static str {
        "unique"
    }
}
