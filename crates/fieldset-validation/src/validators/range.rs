//! Inclusive range validator

use fieldset_core::value::compare;
use fieldset_core::{Concern, Context, Deferred, ValidationResult, Validator};
use serde_json::{json, Value};
use std::cmp::Ordering;

/// The value must lie within `[minimum, maximum]`.
///
/// Bounds are numbers or strings and may be computed on demand. A value that
/// cannot be ordered against a bound fails that bound.
#[derive(Debug, Clone, Default)]
pub struct Range {
    minimum: Option<Deferred<Value>>,
    maximum: Option<Deferred<Value>>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(minimum: impl Into<Value>, maximum: impl Into<Value>) -> Self {
        Self::new().minimum(minimum).maximum(maximum)
    }

    pub fn minimum(mut self, minimum: impl Into<Value>) -> Self {
        self.minimum = Some(Deferred::Literal(minimum.into()));
        self
    }

    pub fn maximum(mut self, maximum: impl Into<Value>) -> Self {
        self.maximum = Some(Deferred::Literal(maximum.into()));
        self
    }

    pub fn minimum_fn<F>(mut self, minimum: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.minimum = Some(Deferred::factory(minimum));
        self
    }

    pub fn maximum_fn<F>(mut self, maximum: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.maximum = Some(Deferred::factory(maximum));
        self
    }
}

fn at_least(value: &Value, minimum: &Value) -> bool {
    matches!(compare(value, minimum), Some(Ordering::Greater | Ordering::Equal))
}

fn at_most(value: &Value, maximum: &Value) -> bool {
    matches!(compare(value, maximum), Some(Ordering::Less | Ordering::Equal))
}

impl Validator for Range {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let minimum = self.minimum.as_ref().map(Deferred::resolve);
        let maximum = self.maximum.as_ref().map(Deferred::resolve);

        match (minimum, maximum) {
            (Some(minimum), Some(maximum)) => {
                if at_least(&value, &minimum) && at_most(&value, &maximum) {
                    Ok(value)
                } else {
                    Err(Concern::new("Out of bounds; must be greater than {0} and less than {1}.")
                        .arg(minimum)
                        .arg(maximum))
                }
            }
            (Some(minimum), None) if !at_least(&value, &minimum) => {
                Err(Concern::new("Too small; must be greater than {0}.").arg(minimum))
            }
            (None, Some(maximum)) if !at_most(&value, &maximum) => {
                Err(Concern::new("Too large; must be less than {0}.").arg(maximum))
            }
            _ => Ok(value),
        }
    }

    fn rule_name(&self) -> &'static str {
        "range"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({
            "minimum": self.minimum.as_ref().map(Deferred::resolve),
            "maximum": self.maximum.as_ref().map(Deferred::resolve),
        }))
    }
}
