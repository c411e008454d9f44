//! Table-driven assertions for validator test suites
//!
//! ```ignore
//! use fieldset_validation::testing::{assert_invalid, assert_valid};
//!
//! assert_valid(&AlwaysTruthy, [json!(1), json!("x")]);
//! assert_invalid(&AlwaysTruthy, [json!(0), json!("")]);
//! ```

use fieldset_core::{Concern, Validator};
use serde_json::Value;

/// Every value must validate and come back unchanged
pub fn assert_valid<V, I>(validator: &V, values: I)
where
    V: Validator + ?Sized,
    I: IntoIterator<Item = Value>,
{
    for value in values {
        match validator.validate(value.clone(), None) {
            Ok(result) => assert_eq!(
                result, value,
                "{} changed {} while validating",
                validator.rule_name(),
                value
            ),
            Err(concern) => panic!(
                "{} rejected {}: {}",
                validator.rule_name(),
                value,
                concern.render()
            ),
        }
    }
}

/// Every value must be rejected; the concerns are returned for inspection
pub fn assert_invalid<V, I>(validator: &V, values: I) -> Vec<Concern>
where
    V: Validator + ?Sized,
    I: IntoIterator<Item = Value>,
{
    values
        .into_iter()
        .map(|value| match validator.validate(value.clone(), None) {
            Ok(_) => panic!("Failed to raise a Concern: {}", value),
            Err(concern) => concern,
        })
        .collect()
}

/// Every input must validate to its expected (normalized) output
pub fn assert_converts<V, I>(validator: &V, cases: I)
where
    V: Validator + ?Sized,
    I: IntoIterator<Item = (Value, Value)>,
{
    for (input, expected) in cases {
        match validator.validate(input.clone(), None) {
            Ok(result) => assert_eq!(result, expected, "unexpected result for {}", input),
            Err(concern) => {
                panic!("{} rejected {}: {}", validator.rule_name(), input, concern.render())
            }
        }
    }
}
