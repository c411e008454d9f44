//! Unconditional and closure-backed validators

use fieldset_core::{Concern, Context, ValidationResult, Validator};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Always passes. Handy as a stand-in while debugging other rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Always;

impl Validator for Always {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        Ok(value)
    }

    fn rule_name(&self) -> &'static str {
        "always"
    }
}

/// Never passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Never;

impl Validator for Never {
    fn validate(&self, _value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        Err(Concern::new("Set to always fail."))
    }

    fn rule_name(&self) -> &'static str {
        "never"
    }
}

/// Closure signature used by [`Callback`]
pub type CallbackFn = Arc<dyn Fn(Value, Context<'_>) -> ValidationResult<Value> + Send + Sync>;

/// Validate with an arbitrary closure.
///
/// The closure gets the value and the context and returns the value to keep
/// or a concern. Without a closure the value passes through.
#[derive(Clone, Default)]
pub struct Callback {
    callback: Option<CallbackFn>,
}

impl Callback {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Value, Context<'_>) -> ValidationResult<Value> + Send + Sync + 'static,
    {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    pub fn passthrough() -> Self {
        Self::default()
    }
}

impl Validator for Callback {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        match &self.callback {
            Some(callback) => callback(value, context),
            None => Ok(value),
        }
    }

    fn rule_name(&self) -> &'static str {
        "callback"
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("callback", &self.callback.as_ref().map(|_| "<callback_fn>"))
            .finish()
    }
}
