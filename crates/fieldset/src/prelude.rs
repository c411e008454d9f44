//! # Prelude
//!
//! Convenient imports for declaring schemas and wiring up rules.
//!
//! ```rust
//! use fieldset::prelude::*;
//! ```

// Declaration
pub use crate::{Deferred, Field, FieldKind, Instance, Schema, SchemaBuilder, Slot};

// Failures
pub use crate::{AttributeMissing, Concern, SchemaError, SchemaResult, Severity};

// Validation
pub use crate::{Context, ValidationResult, Validator, ValueKind};
pub use fieldset_validation::{
    All, Always, AlwaysFalsy, AlwaysMissing, AlwaysRequired, AlwaysTruthy, Any, Callback,
    Contains, Equal, Falsy, In, InstanceOf, Iterable, Length, LengthBounds, Mapping, Missing,
    Never, Pattern, Pipe, Range, Require, Required, Truthy, Unique,
};

// Transforms
pub use crate::{Encoding, TransformOptions};
pub use fieldset_transform::{
    Array, BaseTransform, Boolean, CallbackTransform, Decimal, EgressTransform, IngressTransform,
    Integer, Number, SplitTransform, TextTransform, Token, Transform, WebBoolean,
};

// JSON helper
pub use serde_json::{json, Value};

// Common derives
pub use serde::{Deserialize, Serialize};
