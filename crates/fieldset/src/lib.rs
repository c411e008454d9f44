//! # fieldset
//!
//! Declarative schemas for Rust: ordered, inheritance-aware field
//! registries, descriptors with defaults and inline validation, composable
//! validation rules, and bidirectional value transforms.
//!
//! This is the umbrella package. It re-exports the member crates and the
//! types most applications use directly.
//!
//! ```rust,ignore
//! use fieldset::prelude::*;
//!
//! let account = Schema::builder("Account")
//!     .field("username", Field::validated(All::default().with(AlwaysRequired)))
//!     .field("age", Field::data().with_default(18))
//!     .build();
//!
//! let instance = account.instantiate();
//! instance.set("username", json!("alice"))?;
//! ```

// Re-export all sub-packages as modules
pub use fieldset_core as core;
pub use fieldset_transform as transform;
pub use fieldset_validation as validation;

// Re-export common types at root level for convenience
pub use fieldset_core::{
    AttributeMissing, Concern, ConfigError, Context, Deferred, Encoding, Field, FieldKind,
    Instance, Registry, Schema, SchemaBuilder, SchemaError, SchemaResult, Severity, Slot,
    TransformOptions, ValidationResult, Validator, ValueKind,
};
pub use fieldset_transform::{Transform, TransformResult};
pub use fieldset_validation::{All, Any, Compound, Iterable, Mapping, Pipe, Require};

// Prelude module for convenient imports
pub mod prelude;

/// Current version of fieldset
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
