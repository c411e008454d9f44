//! Length validator

use fieldset_core::value::measure;
use fieldset_core::{Concern, Context, Deferred, ValidationResult, Validator};
use serde_json::{json, Value};

/// Slice-style length bounds: `start` inclusive, `stop` exclusive, with an
/// optional `step`. Negative bounds count back from one past the measured
/// length, and omitted bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl LengthBounds {
    /// Shorter than `stop`, the way a bare integer bound reads
    pub fn up_to(stop: i64) -> Self {
        Self {
            stop: Some(stop),
            ..Self::default()
        }
    }

    pub fn between(start: i64, stop: i64) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// Exactly `size` long
    pub fn exact(size: i64) -> Self {
        Self::between(size, size + 1)
    }

    /// At least `start` long
    pub fn at_least(start: i64) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    pub fn step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Whether `length` falls inside the bounds
    pub fn admits(&self, length: usize) -> bool {
        let length = length as i64;
        let span = length + 1;
        let step = self.step.filter(|step| *step != 0).unwrap_or(1);

        let (lower, upper) = if step > 0 { (0, span) } else { (-1, span - 1) };
        let clamp = |bound: Option<i64>, default: i64| match bound {
            None => default,
            Some(bound) if bound < 0 => (bound + span).max(lower),
            Some(bound) => bound.min(upper),
        };

        let start = clamp(self.start, if step > 0 { lower } else { upper });
        let stop = clamp(self.stop, if step > 0 { upper } else { lower });

        if step > 0 {
            start <= length && length < stop && (length - start) % step == 0
        } else {
            stop < length && length <= start && (start - length) % -step == 0
        }
    }

    fn arg(bound: Option<i64>) -> Value {
        bound.map_or(Value::Null, Value::from)
    }
}

/// The value's length (characters, elements, or entries) must fall within the
/// bounds. Without bounds everything passes.
#[derive(Debug, Clone, Default)]
pub struct Length {
    bounds: Option<Deferred<LengthBounds>>,
}

impl Length {
    pub fn new(bounds: LengthBounds) -> Self {
        Self {
            bounds: Some(Deferred::Literal(bounds)),
        }
    }

    pub fn from_fn<F>(bounds: F) -> Self
    where
        F: Fn() -> LengthBounds + Send + Sync + 'static,
    {
        Self {
            bounds: Some(Deferred::factory(bounds)),
        }
    }

    /// Shorthand for a non-empty requirement
    pub fn non_empty() -> Self {
        Self::new(LengthBounds::at_least(1))
    }
}

impl Validator for Length {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let bounds = match &self.bounds {
            Some(bounds) => bounds.resolve(),
            None => return Ok(value),
        };

        let start = LengthBounds::arg(bounds.start);
        let stop = LengthBounds::arg(bounds.stop);

        match measure(&value) {
            None => Err(Concern::new("Value can't be measured; must be between {0} and {1} long.")
                .arg(start)
                .arg(stop)),
            Some(length) if !bounds.admits(length) => {
                Err(Concern::new("Length out of bounds; must be between {0} and {1} long.")
                    .arg(start)
                    .arg(stop))
            }
            Some(_) => Ok(value),
        }
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        self.bounds.as_ref().map(|bounds| {
            let bounds = bounds.resolve();
            json!({ "start": bounds.start, "stop": bounds.stop, "step": bounds.step })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_bound() {
        let rule = Length::new(LengthBounds::up_to(20));
        assert!(rule.validate(json!(""), None).is_ok());
        assert!(rule.validate(json!("x".repeat(19)), None).is_ok());

        let concern = rule.validate(json!("x".repeat(20)), None).unwrap_err();
        assert_eq!(concern.render(), "Length out of bounds; must be between None and 20 long.");
    }

    #[test]
    fn test_range_bounds() {
        let rule = Length::new(LengthBounds::between(2, 4));
        assert!(rule.validate(json!([1]), None).is_err());
        assert!(rule.validate(json!([1, 2]), None).is_ok());
        assert!(rule.validate(json!({"a": 1, "b": 2, "c": 3}), None).is_ok());
        assert!(rule.validate(json!("abcd"), None).is_err());
    }

    #[test]
    fn test_exact_and_step() {
        let exact = Length::new(LengthBounds::exact(3));
        assert!(exact.validate(json!("abc"), None).is_ok());
        assert!(exact.validate(json!("ab"), None).is_err());

        let even = Length::new(LengthBounds::between(0, 10).step(2));
        assert!(even.validate(json!("abcd"), None).is_ok());
        assert!(even.validate(json!("abc"), None).is_err());
    }

    #[test]
    fn test_unmeasurable() {
        let concern = Length::new(LengthBounds::between(1, 5))
            .validate(json!(27), None)
            .unwrap_err();
        assert_eq!(concern.render(), "Value can't be measured; must be between 1 and 5 long.");
    }

    #[test]
    fn test_negative_bounds_count_from_end() {
        let bounds = LengthBounds {
            start: Some(-100),
            stop: None,
            step: None,
        };
        assert!(bounds.admits(0));
        assert!(bounds.admits(7));

        assert!(LengthBounds::at_least(1).admits(1));
        assert!(!LengthBounds::at_least(1).admits(0));
        assert!(Length::non_empty().validate(json!("x"), None).is_ok());
        assert!(Length::default().validate(json!(1), None).is_ok());
    }
}
