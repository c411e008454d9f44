//! Shared transform configuration
//!
//! Every leaf transform carries a [`TransformOptions`]: whether strings are
//! stripped, which byte encoding the stream operations use, and whether blank
//! input maps to null. Options can be built in code, deserialized from YAML or
//! JSON, or read from the environment.

use crate::concern::Concern;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable controlling [`TransformOptions::strip`]
pub const ENV_STRIP: &str = "FIELDSET_STRIP";
/// Environment variable controlling [`TransformOptions::encoding`]
pub const ENV_ENCODING: &str = "FIELDSET_ENCODING";
/// Environment variable controlling [`TransformOptions::none`]
pub const ENV_NONE_ON_EMPTY: &str = "FIELDSET_NONE_ON_EMPTY";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Byte encoding used when reading from or writing to streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
    #[serde(rename = "ascii", alias = "us-ascii", alias = "ASCII")]
    Ascii,
    #[serde(rename = "latin-1", alias = "iso-8859-1", alias = "latin1")]
    Latin1,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Decode bytes into text
    pub fn decode(&self, bytes: &[u8]) -> Result<String, Concern> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                Concern::new("Unable to decode {0} input: {1}")
                    .arg(self.name())
                    .arg(e.to_string())
            }),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => {
                    let message = "Unable to decode {0} input: invalid byte at offset {1}";
                    Err(Concern::new(message).arg(self.name()).arg(offset))
                }
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encode text into bytes
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Concern> {
        let limit = match self {
            Encoding::Utf8 => return Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => 0x7f,
            Encoding::Latin1 => 0xff,
        };

        text.chars()
            .map(|c| {
                if (c as u32) <= limit {
                    Ok(c as u8)
                } else {
                    Err(Concern::new("Unable to encode {0!r} as {1}.")
                        .arg(c.to_string())
                        .arg(self.name()))
                }
            })
            .collect()
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(ConfigError::invalid_value(
                "encoding",
                s,
                "utf-8, ascii, or latin-1",
            )),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options shared by every leaf transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Trim surrounding whitespace from strings
    pub strip: bool,
    /// Encoding for stream input and output
    pub encoding: Encoding,
    /// Map blank input to null instead of rejecting it
    pub none: bool,
}

impl TransformOptions {
    /// The defaults: strip, utf-8, blank input is null
    pub const DEFAULT: TransformOptions = TransformOptions {
        strip: true,
        encoding: Encoding::Utf8,
        none: true,
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }

    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn none(mut self, none: bool) -> Self {
        self.none = none;
        self
    }

    /// Trim `text` if stripping is enabled
    pub fn clean<'a>(&self, text: &'a str) -> &'a str {
        if self.strip {
            text.trim()
        } else {
            text
        }
    }

    /// Parse options from YAML; missing keys take their defaults
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parse options from JSON; missing keys take their defaults
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load options from environment variables, starting from the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut options = Self::new();

        if let Ok(value) = env::var(ENV_STRIP) {
            options.strip = parse_flag("strip", &value)?;
        }

        if let Ok(value) = env::var(ENV_ENCODING) {
            options.encoding = value.parse()?;
        }

        if let Ok(value) = env::var(ENV_NONE_ON_EMPTY) {
            options.none = parse_flag("none", &value)?;
        }

        Ok(options)
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, value, "true or false")),
    }
}
