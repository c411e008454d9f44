//! Core transform trait and the passthrough bases

use fieldset_core::value::display;
use fieldset_core::{Concern, Context, TransformOptions};
use serde_json::Value;
use std::io::{Read, Write};
use std::sync::Arc;

pub type TransformResult<T> = Result<T, Concern>;

/// Converts values between their native and foreign representations.
///
/// `native` and `foreign` are the two directions. The string and stream
/// operations are derived from them: blank input loads as null and null
/// dumps as the empty string.
pub trait Transform: Send + Sync {
    /// Foreign to native
    fn native(&self, value: Value, context: Context<'_>) -> TransformResult<Value>;

    /// Native to foreign
    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value>;

    /// Strip, encoding, and none-on-empty settings
    fn options(&self) -> &TransformOptions {
        &TransformOptions::DEFAULT
    }

    /// Parse a string. Blank input is null.
    fn loads(&self, text: &str, context: Context<'_>) -> TransformResult<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        self.native(Value::String(text.to_string()), context)
    }

    /// Render a value as a string. Null is the empty string.
    fn dumps(&self, value: Value, context: Context<'_>) -> TransformResult<String> {
        if value.is_null() {
            return Ok(String::new());
        }

        Ok(match self.foreign(value, context)? {
            Value::Null => String::new(),
            other => display(&other),
        })
    }

    /// Read everything from `reader`, decode it, and parse it
    fn load(&self, reader: &mut dyn Read, context: Context<'_>) -> TransformResult<Value> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Concern::new("Unable to read input: {0}").arg(e.to_string()))?;

        let text = self.options().encoding.decode(&bytes)?;
        self.loads(&text, context)
    }

    /// Render `value`, encode it, and write it to `writer`; returns the number
    /// of bytes written
    fn dump(
        &self,
        writer: &mut dyn Write,
        value: Value,
        context: Context<'_>,
    ) -> TransformResult<usize> {
        let text = self.dumps(value, context)?;
        let bytes = self.options().encoding.encode(&text)?;
        writer
            .write_all(&bytes)
            .map_err(|e| Concern::new("Unable to write output: {0}").arg(e.to_string()))?;

        Ok(bytes.len())
    }
}

impl<T: Transform + ?Sized> Transform for Arc<T> {
    fn native(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        (**self).native(value, context)
    }

    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        (**self).foreign(value, context)
    }

    fn options(&self) -> &TransformOptions {
        (**self).options()
    }

    fn loads(&self, text: &str, context: Context<'_>) -> TransformResult<Value> {
        (**self).loads(text, context)
    }

    fn dumps(&self, value: Value, context: Context<'_>) -> TransformResult<String> {
        (**self).dumps(value, context)
    }

    fn load(&self, reader: &mut dyn Read, context: Context<'_>) -> TransformResult<Value> {
        (**self).load(reader, context)
    }

    fn dump(
        &self,
        writer: &mut dyn Write,
        value: Value,
        context: Context<'_>,
    ) -> TransformResult<usize> {
        (**self).dump(writer, value, context)
    }
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn native(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        (**self).native(value, context)
    }

    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        (**self).foreign(value, context)
    }

    fn options(&self) -> &TransformOptions {
        (**self).options()
    }

    fn loads(&self, text: &str, context: Context<'_>) -> TransformResult<Value> {
        (**self).loads(text, context)
    }

    fn dumps(&self, value: Value, context: Context<'_>) -> TransformResult<String> {
        (**self).dumps(value, context)
    }

    fn load(&self, reader: &mut dyn Read, context: Context<'_>) -> TransformResult<Value> {
        (**self).load(reader, context)
    }

    fn dump(
        &self,
        writer: &mut dyn Write,
        value: Value,
        context: Context<'_>,
    ) -> TransformResult<usize> {
        (**self).dump(writer, value, context)
    }
}

/// Passes values through unchanged in both directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseTransform;

impl Transform for BaseTransform {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(value)
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(value)
    }
}

/// Text-aware base: strips incoming strings and renders outgoing values as
/// strings. Blank strings stay blank; only `loads` maps them to null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTransform {
    options: TransformOptions,
}

impl TextTransform {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }
}

impl Transform for TextTransform {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(match value {
            Value::String(text) => Value::String(self.options.clean(&text).to_string()),
            other => other,
        })
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(match value {
            Value::Null => Value::Null,
            Value::String(text) => Value::String(self.options.clean(&text).to_string()),
            other => Value::String(display(&other)),
        })
    }

    fn options(&self) -> &TransformOptions {
        &self.options
    }
}
