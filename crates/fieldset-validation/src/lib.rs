//! # fieldset-validation
//!
//! Validation rules for fieldset schemas: a catalog of leaf validators and
//! the compound combinators that compose them.
//!
//! Every rule implements [`fieldset_core::Validator`] and either returns the
//! (possibly normalized) value or a [`fieldset_core::Concern`]. Rules are
//! plain configuration structs and can be used on their own or attached to a
//! schema field with `Field::validated`.

pub mod compound;
pub mod validators;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use compound::{All, Any, Compound, Iterable, Mapping, Pipe, Require, Rule};
pub use validators::{
    Always, AlwaysFalsy, AlwaysMissing, AlwaysRequired, AlwaysTruthy, Callback, Contains, Equal,
    Falsy, In, InstanceOf, Length, LengthBounds, Missing, Never, Pattern, Range, Required, Truthy,
    Unique,
};

// Core types most callers need alongside the rules
pub use fieldset_core::{Concern, Context, Severity, ValidationResult, Validator};
