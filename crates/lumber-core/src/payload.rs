//! Message payloads.
//!
//! A [`Payload`] is whatever the caller handed to a level call. The engine
//! never inspects it; targets branch on its shape when rendering.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The value attached to a log call.
///
/// Serializes as the plain JSON value. `Absent` has no JSON form of its own
/// and writes `null` when serialized alone; [`LogRecord`](crate::LogRecord)
/// omits the field instead so it reads back as `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// JSON-style null
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer or finite float
    Number(Number),
    /// Text message
    Text(String),
    /// Arrays and objects
    Structured(Value),
    /// No value was supplied
    #[default]
    Absent,
}

impl Payload {
    /// Returns true if the payload can be rendered inline on one line.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Structured(_))
    }

    /// Returns true if no value was supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the text if this is a text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Converts the payload into a JSON value. `Absent` becomes `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null | Self::Absent => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(text) => Value::String(text.clone()),
            Self::Structured(value) => value.clone(),
        }
    }

    /// Renders a structured payload across multiple lines.
    ///
    /// Primitive payloads render exactly as [`fmt::Display`] does.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        match self {
            Self::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Absent => f.write_str("undefined"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for Payload {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! payload_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Payload {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

payload_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Payload {
    /// Non-finite values have no JSON number form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<f32> for Payload {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            structured @ (Value::Array(_) | Value::Object(_)) => Self::Structured(structured),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<()> for Payload {
    fn from((): ()) -> Self {
        Self::Absent
    }
}
