//! Boolean transforms

use crate::transform::{Transform, TransformResult};
use fieldset_core::value::is_truthy;
use fieldset_core::{Concern, Context, TransformOptions};
use serde_json::Value;

const TRUTHY: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];
const FALSY: [&str; 6] = ["false", "f", "no", "n", "off", "0"];

/// Converts between booleans and textual tokens.
///
/// Incoming strings are matched case-insensitively against the truthy and
/// falsy lists; other values use their truthiness. Outgoing values become the
/// token at `use_index` of the matching list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    options: TransformOptions,
    truthy: Vec<String>,
    falsy: Vec<String>,
    use_index: usize,
}

impl Default for Boolean {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl Boolean {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            truthy: TRUTHY.iter().map(|s| s.to_string()).collect(),
            falsy: FALSY.iter().map(|s| s.to_string()).collect(),
            use_index: 0,
        }
    }

    pub fn truthy<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.truthy = tokens.into_iter().map(|s| s.into().to_lowercase()).collect();
        self
    }

    pub fn falsy<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.falsy = tokens.into_iter().map(|s| s.into().to_lowercase()).collect();
        self
    }

    /// Which token of each list to emit on the foreign side
    pub fn use_index(mut self, index: usize) -> Self {
        self.use_index = index;
        self
    }

    pub fn truthy_tokens(&self) -> &[String] {
        &self.truthy
    }

    pub fn falsy_tokens(&self) -> &[String] {
        &self.falsy
    }

    /// The token emitted for `flag`
    pub fn token(&self, flag: bool) -> TransformResult<&str> {
        let tokens = if flag { &self.truthy } else { &self.falsy };
        tokens
            .get(self.use_index)
            .or_else(|| tokens.first())
            .map(String::as_str)
            .ok_or_else(|| {
                let kind = if flag { "truthy" } else { "falsy" };
                Concern::new("No {0} token configured.").arg(kind)
            })
    }

    /// Truthiness used on the foreign side. Values that don't parse fall back
    /// to plain truthiness.
    fn flag(&self, value: &Value, context: Context<'_>) -> bool {
        match self.native(value.clone(), context) {
            Ok(Value::Bool(flag)) => flag,
            Ok(other) => is_truthy(&other),
            Err(_) => match value {
                Value::String(text) => !self.options.clean(text).is_empty(),
                other => is_truthy(other),
            },
        }
    }
}

impl Transform for Boolean {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let text = match value {
            Value::Null if self.options.none => return Ok(Value::Null),
            Value::String(text) => text,
            other => return Ok(Value::Bool(is_truthy(&other))),
        };

        let cleaned = self.options.clean(&text);
        if self.options.none && cleaned.is_empty() {
            return Ok(Value::Null);
        }

        let lowered = cleaned.to_lowercase();
        if self.truthy.contains(&lowered) {
            Ok(Value::Bool(true))
        } else if self.falsy.contains(&lowered) {
            Ok(Value::Bool(false))
        } else {
            Err(Concern::new("Unable to convert {0!r} to a boolean value.").arg(cleaned))
        }
    }

    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        if self.options.none && value.is_null() {
            return Ok(Value::String(String::new()));
        }

        let flag = self.flag(&value, context);
        Ok(Value::String(self.token(flag)?.to_string()))
    }

    fn options(&self) -> &TransformOptions {
        &self.options
    }
}

/// Boolean handling for web forms that pair a hidden field with a checkbox.
///
/// A multi-valued field keeps only its last value, and a missing value reads
/// as `false`. The foreign side is a JSON boolean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebBoolean {
    inner: Boolean,
}

impl WebBoolean {
    pub fn new(inner: Boolean) -> Self {
        Self { inner }
    }
}

impl Transform for WebBoolean {
    fn native(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        let value = match value {
            Value::Array(mut items) => items.pop().unwrap_or(Value::Null),
            other => other,
        };

        Ok(match self.inner.native(value, context)? {
            Value::Null => Value::Bool(false),
            other => other,
        })
    }

    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        Ok(Value::Bool(self.inner.flag(&value, context)))
    }

    fn options(&self) -> &TransformOptions {
        self.inner.options()
    }
}
