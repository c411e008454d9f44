//! Built-in leaf validators

pub mod basic;
pub mod kind;
pub mod length;
pub mod membership;
pub mod pattern;
pub mod presence;
pub mod range;

pub use basic::{Always, Callback, CallbackFn, Never};
pub use kind::InstanceOf;
pub use length::{Length, LengthBounds};
pub use membership::{Contains, Equal, In, Unique};
pub use pattern::Pattern;
pub use presence::{
    AlwaysFalsy, AlwaysMissing, AlwaysRequired, AlwaysTruthy, Falsy, Missing, Required, Truthy,
};
pub use range::Range;
