//! # fieldset-transform
//!
//! Bidirectional value transforms for fieldset schemas.
//!
//! A [`Transform`] converts between a field's native value and its foreign
//! representation, usually a string at an I/O boundary. `native` and
//! `foreign` are the two primitive directions; `loads`, `dumps`, `load`, and
//! `dump` are derived from them and honor the shared [`TransformOptions`].
//!
//! ```rust,ignore
//! use fieldset_transform::{Boolean, Transform};
//!
//! let boolean = Boolean::default();
//! assert_eq!(boolean.loads("yes", None)?, serde_json::json!(true));
//! assert_eq!(boolean.dumps(serde_json::json!(false), None)?, "false");
//! ```

pub mod array;
pub mod boolean;
pub mod composite;
pub mod numeric;
pub mod token;
pub mod transform;

pub use array::Array;
pub use boolean::{Boolean, WebBoolean};
pub use composite::{
    CallbackTransform, Conversion, EgressTransform, IngressTransform, SplitTransform,
    SplitTransformBuilder,
};
pub use numeric::{Decimal, Integer, Number};
pub use token::{Grouping, Normalizer, Token};
pub use transform::{BaseTransform, TextTransform, Transform, TransformResult};

pub use fieldset_core::{Concern, Context, Encoding, TransformOptions};
