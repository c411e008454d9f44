//! Regular expression validator

use fieldset_core::{Concern, Context, ValidationResult, Validator};
use regex::Regex;
use serde_json::{json, Value};

/// The value must match a regular expression at its start.
///
/// Null values pass; any other non-string fails. Without a pattern
/// everything passes.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    pattern: Option<Regex>,
}

impl Pattern {
    /// Compile `pattern`
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            pattern: Some(regex),
        }
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Leftmost match starting at offset zero
    fn matches_at_start(regex: &Regex, text: &str) -> bool {
        regex.find(text).map_or(false, |found| found.start() == 0)
    }
}

impl Validator for Pattern {
    fn validate(&self, value: Value, _context: Context<'_>) -> ValidationResult<Value> {
        let regex = match &self.pattern {
            Some(regex) if !value.is_null() => regex,
            _ => return Ok(value),
        };

        match value.as_str() {
            Some(text) if Self::matches_at_start(regex, text) => Ok(value),
            _ => Err(Concern::new("Failed to match required pattern.")),
        }
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        self.pattern
            .as_ref()
            .map(|regex| json!({ "pattern": regex.as_str() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_from_start() {
        let rule = Pattern::new(r"[a-z]+").unwrap();
        assert!(rule.validate(json!("foo"), None).is_ok());
        assert!(rule.validate(json!("foo123"), None).is_ok());
        assert_eq!(
            rule.validate(json!("123foo"), None).unwrap_err().render(),
            "Failed to match required pattern."
        );
    }

    #[test]
    fn test_null_and_non_strings() {
        let rule = Pattern::new(r"\d+").unwrap();
        assert!(rule.validate(Value::Null, None).is_ok());
        assert!(rule.validate(json!(27), None).is_err());
        assert!(Pattern::default().validate(json!(27), None).is_ok());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Pattern::new("(unclosed").is_err());
        assert_eq!(
            Pattern::new("^x$").unwrap().parameters(),
            Some(json!({"pattern": "^x$"}))
        );
    }
}
