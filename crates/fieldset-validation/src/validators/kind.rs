//! Value kind validator

use fieldset_core::{Concern, Context, ValidationResult, Validator, ValueKind};
use serde_json::{json, Value};

/// The value must be of one of the given kinds. No kinds allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceOf {
    kinds: Vec<ValueKind>,
}

impl InstanceOf {
    pub fn new(kind: ValueKind) -> Self {
        Self { kinds: vec![kind] }
    }

    pub fn any_of(kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn kinds(&self) -> &[ValueKind] {
        &self.kinds
    }

    fn describe(&self) -> String {
        self.kinds
            .iter()
            .map(ValueKind::name)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl Validator for InstanceOf {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        if self.kinds.is_empty() || self.kinds.iter().any(|kind| kind.matches(&value)) {
            Ok(value)
        } else {
            Err(Concern::new("Value is not an instance of {0!r}.").arg(self.describe()))
        }
    }

    fn rule_name(&self) -> &'static str {
        "instance_of"
    }

    fn parameters(&self) -> Option<Value> {
        Some(json!({ "kinds": self.kinds }))
    }
}
