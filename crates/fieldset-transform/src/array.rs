//! Delimited string <-> array transform

use crate::transform::{Transform, TransformResult};
use fieldset_core::value::display;
use fieldset_core::{Concern, Context, TransformOptions};
use serde_json::Value;

/// Splits strings into arrays of strings and joins them back.
///
/// With the defaults (comma separator, stripping, empty elements dropped):
///
/// ```text
/// "foo,bar, baz   , , diz" -> ["foo", "bar", "baz", "diz"] -> "foo,bar,baz,diz"
/// ```
///
/// Without a separator, native splits on runs of whitespace and foreign joins
/// with a single space. For quoting and prefix groups see [`crate::Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    options: TransformOptions,
    separator: Option<String>,
    empty: bool,
}

impl Default for Array {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl Array {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            separator: Some(", ".to_string()),
            empty: false,
        }
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Split on whitespace instead of a fixed separator
    pub fn whitespace(mut self) -> Self {
        self.separator = None;
        self
    }

    /// Keep elements that are empty after cleaning
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = empty;
        self
    }

    /// The separator in effect, trimmed when stripping. `None` means whitespace.
    fn effective_separator(&self) -> Option<&str> {
        self.separator
            .as_deref()
            .map(|separator| self.options.clean(separator))
            .filter(|separator| !separator.is_empty())
    }

    fn clean<I>(&self, items: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        items
            .into_iter()
            .map(|item| self.options.clean(&item).to_string())
            .filter(|item| self.empty || !item.is_empty())
            .collect()
    }
}

impl Transform for Array {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let items: Vec<String> = match value {
            Value::Null => Vec::new(),
            Value::String(text) => {
                let text = self.options.clean(&text);
                if text.trim().is_empty() {
                    Vec::new()
                } else {
                    match self.effective_separator() {
                        Some(separator) => self.clean(text.split(separator).map(str::to_string)),
                        None => self.clean(text.split_whitespace().map(str::to_string)),
                    }
                }
            }
            Value::Array(items) => self.clean(items.iter().map(display)),
            other => {
                return Err(Concern::new("Unable to convert {0!r} to an array.").arg(other));
            }
        };

        Ok(Value::Array(items.into_iter().map(Value::String).collect()))
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let items: Vec<String> = match value {
            Value::Null => return Ok(Value::Null),
            Value::Array(items) => items.iter().map(display).collect(),
            Value::String(text) => text.chars().map(String::from).collect(),
            Value::Object(map) => map.values().map(display).collect(),
            other => {
                let message = "Unable to join {0!r}; value must be iterable.";
                return Err(Concern::new(message).arg(other));
            }
        };

        let separator = self.effective_separator().unwrap_or(" ");
        Ok(Value::String(self.clean(items).join(separator)))
    }

    fn options(&self) -> &TransformOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arrays() -> Vec<Value> {
        vec![
            Value::Null,
            json!([]),
            json!([0, 1, "", 2, 3]),
            json!("foo,bar"),
            json!("foo ,bar"),
            json!("foo,,bar"),
            json!("foo, bar"),
        ]
    }

    fn two() -> Value {
        json!(["foo", "bar"])
    }

    fn three() -> Value {
        json!(["foo", "", "bar"])
    }

    #[test]
    fn test_default_native() {
        let expected = [
            json!([]),
            json!([]),
            json!(["0", "1", "2", "3"]),
            two(),
            two(),
            two(),
            two(),
        ];
        for (value, expected) in arrays().into_iter().zip(expected) {
            assert_eq!(Array::default().native(value, None).unwrap(), expected);
        }
    }

    #[test]
    fn test_default_foreign() {
        let array = Array::default();
        for value in [two(), three(), json!(["foo ", "bar"]), json!(["foo", " bar"])] {
            assert_eq!(array.foreign(value, None).unwrap(), json!("foo,bar"));
        }
        assert_eq!(array.foreign(json!("bob"), None).unwrap(), json!("b,o,b"));
    }

    #[test]
    fn test_empty_native() {
        let array = Array::default().empty(true);
        let expected = [
            json!([]),
            json!([]),
            json!(["0", "1", "", "2", "3"]),
            two(),
            two(),
            three(),
            two(),
        ];
        for (value, expected) in arrays().into_iter().zip(expected) {
            assert_eq!(array.native(value, None).unwrap(), expected);
        }
    }

    #[test]
    fn test_empty_foreign() {
        let array = Array::default().empty(true);
        assert_eq!(array.foreign(two(), None).unwrap(), json!("foo,bar"));
        assert_eq!(array.foreign(three(), None).unwrap(), json!("foo,,bar"));
    }

    #[test]
    fn test_custom_separator() {
        let array = Array::default().separator("|");
        for text in ["foo|bar", "foo |bar", "foo||bar"] {
            assert_eq!(array.native(json!(text), None).unwrap(), two());
        }
    }

    #[test]
    fn test_no_strip() {
        let array = Array::new(TransformOptions::new().strip(false));
        assert_eq!(array.native(json!("foo, bar"), None).unwrap(), two());
        assert_eq!(array.native(json!("foo , bar"), None).unwrap(), json!(["foo ", "bar"]));
        assert_eq!(array.native(json!("foo,  bar"), None).unwrap(), json!(["foo", " bar"]));
    }

    #[test]
    fn test_whitespace_separator() {
        let array = Array::default().whitespace();
        assert_eq!(array.native(json!("foo bar"), None).unwrap(), two());
        assert_eq!(array.native(json!("foo  bar"), None).unwrap(), two());
        assert_eq!(array.foreign(two(), None).unwrap(), json!("foo bar"));
        assert_eq!(array.foreign(three(), None).unwrap(), json!("foo bar"));
    }

    #[test]
    fn test_non_iterables() {
        assert!(Array::default().native(json!(27), None).is_err());
        assert!(Array::default().foreign(json!(true), None).is_err());
        assert_eq!(Array::default().dumps(two(), None).unwrap(), "foo,bar");
    }
}
