//! Core validation trait
//!
//! Every rule, leaf or compound, implements [`Validator`]. Field descriptors
//! in this crate only need the trait; the concrete catalog lives in the
//! validation crate.

use crate::concern::Concern;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// Arbitrary caller-supplied context for a validation run.
///
/// Validated fields pass the owning [`Instance`](crate::Instance); other
/// callers may pass anything, or nothing.
pub type Context<'a> = Option<&'a dyn Any>;

pub type ValidationResult<T> = Result<T, Concern>;

/// A rule evaluated against a value.
///
/// Implementations return the value (possibly normalized) or a [`Concern`].
/// They keep no per-call state, so a single rule may be shared across
/// threads and evaluated reentrantly.
pub trait Validator: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str {
        "validator"
    }

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// The trivial rule: returns every value unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Validator for Identity {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        Ok(value)
    }

    fn rule_name(&self) -> &'static str {
        "identity"
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        (**self).validate(value, context)
    }

    fn rule_name(&self) -> &'static str {
        (**self).rule_name()
    }

    fn parameters(&self) -> Option<Value> {
        (**self).parameters()
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: Value, context: Context<'_>) -> ValidationResult<Value> {
        (**self).validate(value, context)
    }

    fn rule_name(&self) -> &'static str {
        (**self).rule_name()
    }

    fn parameters(&self) -> Option<Value> {
        (**self).parameters()
    }
}

/// Downcast a validation context to a concrete type
pub fn context_as<'a, T: 'static>(context: Context<'a>) -> Option<&'a T> {
    context.and_then(|context| context.downcast_ref::<T>())
}
