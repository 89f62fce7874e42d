//! Records and the identities read from them.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// An opaque field map supplied by the caller.
///
/// Only the fields named by configuration are ever inspected.
pub type Record = serde_json::Map<String, Value>;

/// Identity of a record, read from one of its fields.
///
/// Integers, other numbers and strings are distinct kinds: `1` never matches
/// `"1"` and `1.5` never matches `"1.5"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    Int(i64),
    /// A number outside `i64`, kept as its JSON text
    Number(String),
    Text(String),
}

impl RecordId {
    /// Converts a field value into an id.
    ///
    /// `null`, booleans, arrays and objects carry no identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn from_number(n: &serde_json::Number) -> Self {
        n.as_i64()
            .map(Self::Int)
            .unwrap_or_else(|| Self::Number(n.to_string()))
    }

    /// Parses command line input: anything that reads as a JSON number is a
    /// numeric id, everything else is text.
    pub fn parse(s: &str) -> Self {
        serde_json::from_str::<serde_json::Number>(s)
            .map(|n| Self::from_number(&n))
            .unwrap_or_else(|_| Self::Text(s.to_string()))
    }

    /// Reads the id stored under `field`, if any.
    pub fn of(record: &Record, field: &str) -> Option<Self> {
        record.get(field).and_then(Self::from_value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Number(n) | Self::Text(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for RecordId {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&RecordId> for RecordId {
    fn from(id: &RecordId) -> Self {
        id.clone()
    }
}
