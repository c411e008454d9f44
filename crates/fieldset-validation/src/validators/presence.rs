//! Presence and truthiness validators
//!
//! Each strict rule (`AlwaysTruthy`, `AlwaysRequired`, ...) has a toggled
//! counterpart that applies the strict check only when enabled and passes
//! everything otherwise. The toggles default to off.

use fieldset_core::value::{is_truthy, measure};
use fieldset_core::{Concern, Context, ValidationResult, Validator};
use serde_json::{json, Value};

fn check_truthy(value: Value) -> ValidationResult<Value> {
    if is_truthy(&value) {
        Ok(value)
    } else {
        Err(Concern::new("Value is missing or empty."))
    }
}

fn check_falsy(value: Value) -> ValidationResult<Value> {
    if is_truthy(&value) {
        Err(Concern::new("Value should be falsy."))
    } else {
        Ok(value)
    }
}

fn check_required(value: Value) -> ValidationResult<Value> {
    if value.is_null() {
        return Err(Concern::new("Value is required, but none was provided."));
    }

    if measure(&value) == Some(0) {
        return Err(Concern::new("Value is required, but provided value is empty."));
    }

    Ok(value)
}

fn check_missing(value: Value) -> ValidationResult<Value> {
    let provided = !value.is_null() && measure(&value).map_or(true, |len| len > 0);
    if provided {
        return Err(Concern::new("Value must be omitted, but value was provided."));
    }

    Ok(value)
}

/// The value must be truthy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysTruthy;

impl Validator for AlwaysTruthy {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        check_truthy(value)
    }

    fn rule_name(&self) -> &'static str {
        "truthy"
    }
}

/// The value must be truthy, when enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Truthy {
    pub enabled: bool,
}

impl Truthy {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Validator for Truthy {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        if self.enabled {
            check_truthy(value)
        } else {
            Ok(value)
        }
    }

    fn rule_name(&self) -> &'static str {
        "truthy"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "enabled": self.enabled }))
    }
}

/// The value must be falsy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysFalsy;

impl Validator for AlwaysFalsy {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        check_falsy(value)
    }

    fn rule_name(&self) -> &'static str {
        "falsy"
    }
}

/// The value must be falsy, when enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Falsy {
    pub enabled: bool,
}

impl Falsy {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Validator for Falsy {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        if self.enabled {
            check_falsy(value)
        } else {
            Ok(value)
        }
    }

    fn rule_name(&self) -> &'static str {
        "falsy"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "enabled": self.enabled }))
    }
}

/// A value must be provided and, if measurable, non-empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysRequired;

impl Validator for AlwaysRequired {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        check_required(value)
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }
}

/// A value must be provided, when enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Required {
    pub enabled: bool,
}

impl Required {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Validator for Required {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        if self.enabled {
            check_required(value)
        } else {
            Ok(value)
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "enabled": self.enabled }))
    }
}

/// The value must be null or empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysMissing;

impl Validator for AlwaysMissing {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        check_missing(value)
    }

    fn rule_name(&self) -> &'static str {
        "missing"
    }
}

/// The value must be null or empty, when enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Missing {
    pub enabled: bool,
}

impl Missing {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Validator for Missing {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        if self.enabled {
            check_missing(value)
        } else {
            Ok(value)
        }
    }

    fn rule_name(&self) -> &'static str {
        "missing"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "enabled": self.enabled }))
    }
}
