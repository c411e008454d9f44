//! # fieldset-core
//!
//! Declarative schema foundation for the fieldset crates.
//!
//! A [`Schema`] is declared once, through [`SchemaBuilder`], from local
//! [`Field`] descriptors and any number of base schemas. The declaration
//! merges everything into an ordered [`Registry`] whose order follows the
//! process-wide [`sequence`] counter, and overriding an inherited field never
//! moves it. [`Instance`]s of a schema hold values that are read and written
//! through the descriptors, which resolve defaults and run inline validation.
//!
//! Failures are reported as [`AttributeMissing`] (nothing stored and no
//! default) or [`Concern`] (a rule rejected a value).

pub mod concern;
pub mod config;
pub mod deferred;
pub mod errors;
pub mod field;
pub mod instance;
pub mod registry;
pub mod schema;
pub mod sequence;
pub mod validator;
pub mod value;

pub use concern::{Concern, Severity};
pub use config::{ConfigError, Encoding, TransformOptions};
pub use deferred::{Deferred, Factory};
pub use errors::{AttributeMissing, SchemaError, SchemaResult};
pub use field::{AttachHook, Field, FieldKind};
pub use instance::{Instance, Slot, Thunk};
pub use registry::{Element, Registry};
pub use schema::{DeclaredHook, Schema, SchemaBuilder};
pub use validator::{context_as, Context, Identity, ValidationResult, Validator};
pub use value::ValueKind;
