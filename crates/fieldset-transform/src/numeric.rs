//! Integer, decimal, and mixed numeric transforms

use crate::transform::{Transform, TransformResult};
use fieldset_core::{Concern, Context, TransformOptions};
use serde_json::{Number as JsonNumber, Value};

/// Render a float the way the foreign side expects it: integral values keep a
/// trailing `.0`.
pub(crate) fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn float_value(value: f64) -> TransformResult<Value> {
    JsonNumber::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| {
            Concern::new("Unable to represent {0} as a decimal value.").arg(value.to_string())
        })
}

/// Cleaned string input, or `None` for a blank string that maps to null
fn text_input<'a>(options: &TransformOptions, text: &'a str) -> Option<&'a str> {
    let cleaned = options.clean(text);
    if options.none && cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn to_integer(options: &TransformOptions, value: &Value) -> TransformResult<Option<JsonNumber>> {
    let invalid = || {
        Concern::new("Unable to convert {0!r} to an integer value.").arg(value.clone())
    };

    match value {
        Value::Null if options.none => Ok(None),
        Value::Bool(flag) => Ok(Some(JsonNumber::from(i64::from(*flag)))),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(Some(number.clone())),
        Value::Number(number) => match number.as_f64() {
            Some(float) if float.is_finite() && float.abs() < 9.2e18 => {
                Ok(Some(JsonNumber::from(float.trunc() as i64)))
            }
            _ => Err(invalid()),
        },
        Value::String(text) => match text_input(options, text) {
            None => Ok(None),
            Some(cleaned) => cleaned
                .parse::<i64>()
                .map(JsonNumber::from)
                .or_else(|_| cleaned.parse::<u64>().map(JsonNumber::from))
                .map(Some)
                .map_err(|_| invalid()),
        },
        _ => Err(invalid()),
    }
}

fn to_decimal(options: &TransformOptions, value: &Value) -> TransformResult<Option<f64>> {
    let invalid = || Concern::new("Unable to convert {0!r} to a decimal value.").arg(value.clone());

    match value {
        Value::Null if options.none => Ok(None),
        Value::Bool(flag) => Ok(Some(if *flag { 1.0 } else { 0.0 })),
        Value::Number(number) => number.as_f64().map(Some).ok_or_else(invalid),
        Value::String(text) => match text_input(options, text) {
            None => Ok(None),
            Some(cleaned) => cleaned.parse::<f64>().map(Some).map_err(|_| invalid()),
        },
        _ => Err(invalid()),
    }
}

/// Whole numbers, parsed from base-10 strings. Floats truncate toward zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Integer {
    options: TransformOptions,
}

impl Integer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }
}

impl Transform for Integer {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        Ok(to_integer(&self.options, &value)?.map_or(Value::Null, Value::Number))
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let integer = to_integer(&self.options, &value)?;
        Ok(integer.map_or(Value::Null, |n| Value::String(n.to_string())))
    }

    fn options(&self) -> &TransformOptions {
        &self.options
    }
}

/// Floating point numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decimal {
    options: TransformOptions,
}

impl Decimal {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }
}

impl Transform for Decimal {
    fn native(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        match to_decimal(&self.options, &value)? {
            Some(float) => float_value(float),
            None => Ok(Value::Null),
        }
    }

    fn foreign(&self, value: Value, _context: Context<'_>) -> TransformResult<Value> {
        let decimal = to_decimal(&self.options, &value)?;
        Ok(decimal.map_or(Value::Null, |f| Value::String(render_float(f))))
    }

    fn options(&self) -> &TransformOptions {
        &self.options
    }
}

/// Integers where possible, decimals otherwise.
///
/// A string that parses as a base-10 integer becomes an integer; anything
/// else numeric becomes a decimal. Numbers arriving as JSON keep their kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Number {
    integer: Integer,
    decimal: Decimal,
}

impl Number {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            integer: Integer::new(options.clone()),
            decimal: Decimal::new(options),
        }
    }

    fn is_integral(value: &Value) -> bool {
        match value {
            Value::Number(number) => number.is_i64() || number.is_u64(),
            Value::Bool(_) => true,
            _ => false,
        }
    }
}

impl Transform for Number {
    fn native(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        if let Value::String(_) = value {
            return match self.integer.native(value.clone(), context) {
                Ok(integer) => Ok(integer),
                Err(_) => self.decimal.native(value, context),
            };
        }

        if Self::is_integral(&value) {
            self.integer.native(value, context)
        } else {
            self.decimal.native(value, context)
        }
    }

    fn foreign(&self, value: Value, context: Context<'_>) -> TransformResult<Value> {
        let value = match value {
            Value::String(_) => self.native(value, context)?,
            other => other,
        };

        if Self::is_integral(&value) {
            self.integer.foreign(value, context)
        } else {
            self.decimal.foreign(value, context)
        }
    }

    fn options(&self) -> &TransformOptions {
        self.integer.options()
    }
}
