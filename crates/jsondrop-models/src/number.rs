//! Numbers kept in their original textual form.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{self, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;

/// Error for text that is not a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number literal: {0:?}")]
pub struct ParseNumberError(pub String);

/// A numeric field stored as its literal text.
///
/// Deserializes from a JSON number or from a string holding one, and
/// serializes back as a bare JSON number with the same text, so values
/// such as `"560037"` or `1.50` round-trip without passing through a
/// float. The text is taken from the JSON token itself, so `1.10` and
/// integers wider than 64 bits keep every digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlexNumber(String);

impl FlexNumber {
    /// Wraps `text` if it is a valid JSON number literal.
    pub fn new(text: impl Into<String>) -> Result<Self, ParseNumberError> {
        let text = text.into();
        if is_number_literal(&text) {
            Ok(Self(text))
        } else {
            Err(ParseNumberError(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_number_literal(text: &str) -> bool {
    !text.is_empty()
        && text.trim() == text
        && serde_json::from_str::<serde_json::Number>(text).is_ok()
}

impl FromStr for FlexNumber {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for FlexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for FlexNumber {
            fn from(n: $t) -> Self {
                Self(n.to_string())
            }
        })*
    };
}

impl_from_int!(i32, i64, u32, u64);

impl Serialize for FlexNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw =
            RawValue::from_string(self.0.clone()).map_err(<S::Error as ser::Error>::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlexNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // With arbitrary_precision the number token arrives as its source text.
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(FlexNumber(n.to_string())),
            Value::String(s) => FlexNumber::new(s).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected a number or a string containing a number, found {}",
                other
            ))),
        }
    }
}
