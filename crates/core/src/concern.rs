//! Structured validation and transformation failures

use crate::value::{display, repr};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// How serious a concern is.
///
/// Only [`Severity::Error`] and above are real failures by convention; the
/// engine itself never filters on severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Numeric level, matching the conventional logging scale
    pub fn level(&self) -> u8 {
        match self {
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Whether consumers should treat this as an actual error
    pub fn is_failure(&self) -> bool {
        *self >= Severity::Error
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single validation or transformation failure.
///
/// The message is a template; positional (`{}`, `{0}`) and named (`{name}`)
/// placeholders are substituted from `args`/`kwargs` only when the concern is
/// rendered, so the template can be translated or inspected first. A `!r`
/// conversion (`{0!r}`) renders strings quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concern {
    severity: Severity,
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    kwargs: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Concern>,
}

impl Concern {
    /// Create an error-level concern with the given message template
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message)
    }

    /// Create a concern with an explicit severity
    pub fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Wrap several failures in one concern whose severity is the highest
    /// among them (or `Error` if there are none).
    pub fn aggregate(message: impl Into<String>, children: Vec<Concern>) -> Self {
        let severity = children
            .iter()
            .map(|child| child.severity)
            .max()
            .unwrap_or_default();

        Self {
            severity,
            message: message.into(),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
            children,
        }
    }

    /// Append a positional template argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a named template argument
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Replace the nested concerns
    pub fn with_children(mut self, children: Vec<Concern>) -> Self {
        self.children = children;
        self
    }

    /// Set the severity
    pub fn severity_level(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Prepend literal text to the message template. Braces in the prefix are
    /// escaped so they survive rendering unchanged.
    pub fn prefixed(mut self, prefix: &str) -> Self {
        let escaped = prefix.replace('{', "{{").replace('}', "}}");
        self.message = format!("{}{}", escaped, self.message);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The unrendered message template
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.kwargs
    }

    pub fn children(&self) -> &[Concern] {
        &self.children
    }

    pub fn is_failure(&self) -> bool {
        self.severity.is_failure()
    }

    /// Substitute the template arguments into the message
    pub fn render(&self) -> String {
        render_template(&self.message, &self.args, &self.kwargs)
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("severity".to_string(), Value::String(self.severity.name().to_string()));
        object.insert("message".to_string(), Value::String(self.render()));

        if !self.children.is_empty() {
            object.insert(
                "concerns".to_string(),
                Value::Array(self.children.iter().map(Concern::to_json).collect()),
            );
        }

        Value::Object(object)
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for Concern {}

/// Expand `{}`/`{0}`/`{name}` placeholders. Unknown placeholders are kept verbatim.
fn render_template(template: &str, args: &[Value], kwargs: &BTreeMap<String, Value>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_positional = 0;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    field.push(inner);
                }

                if !closed {
                    output.push('{');
                    output.push_str(&field);
                    continue;
                }

                let (key, quoted) = match field.split_once('!') {
                    Some((key, conversion)) => (key, conversion.starts_with('r')),
                    None => (field.as_str(), false),
                };
                let key = key.split(':').next().unwrap_or_default();

                let value = if key.is_empty() {
                    let value = args.get(next_positional);
                    next_positional += 1;
                    value
                } else if let Ok(index) = key.parse::<usize>() {
                    args.get(index)
                } else {
                    kwargs.get(key)
                };

                match value {
                    Some(value) if quoted => output.push_str(&repr(value)),
                    Some(value) => output.push_str(&display(value)),
                    None => {
                        output.push('{');
                        output.push_str(&field);
                        output.push('}');
                    }
                }
            }
            other => output.push(other),
        }
    }

    output
}
