//! Cache Value Module
//!
//! The closed set of value shapes a cache entry may hold.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Cache Value ==
/// A value stored under a cache key.
///
/// `Object` is the escape hatch for structured types: the payload is
/// serialized explicitly through [`CacheValue::object`] and read back with
/// [`CacheValue::decode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CacheValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<CacheValue>),
    Map(BTreeMap<String, CacheValue>),
    Object {
        /// Type name recorded at serialization time
        class: String,
        /// Serialized payload
        data: serde_json::Value,
    },
}

impl CacheValue {
    /// Serializes `value` into an `Object` tagged with `class`.
    pub fn object<T: Serialize>(class: impl Into<String>, value: &T) -> Result<Self> {
        Ok(CacheValue::Object {
            class: class.into(),
            data: serde_json::to_value(value)?,
        })
    }

    /// Deserializes an `Object` payload, or any other shape through its
    /// JSON form.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let json = match self {
            CacheValue::Object { data, .. } => data.clone(),
            other => other.to_json(),
        };
        Ok(serde_json::from_value(json)?)
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CacheValue::Null)
    }

    // == Truthiness ==
    /// Loose boolean conversion.
    ///
    /// False-equivalent: `Null`, `false`, `0`, `0.0`, `""`, `"0"`, empty
    /// list, empty map. Every `Object` is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CacheValue::Null => false,
            CacheValue::Bool(b) => *b,
            CacheValue::Int(i) => *i != 0,
            CacheValue::Float(f) => *f != 0.0,
            CacheValue::String(s) => !(s.is_empty() || s == "0"),
            CacheValue::List(items) => !items.is_empty(),
            CacheValue::Map(map) => !map.is_empty(),
            CacheValue::Object { .. } => true,
        }
    }

    /// Inverse of [`is_truthy`](Self::is_truthy).
    pub fn is_falsy(&self) -> bool {
        !self.is_truthy()
    }

    /// Plain JSON rendering, without the serde type tags.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            CacheValue::Null => Value::Null,
            CacheValue::Bool(b) => Value::Bool(*b),
            CacheValue::Int(i) => Value::from(*i),
            CacheValue::Float(f) => Value::from(*f),
            CacheValue::String(s) => Value::String(s.clone()),
            CacheValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            CacheValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            CacheValue::Object { data, .. } => data.clone(),
        }
    }
}

/// JSON-like rendering. Non-finite floats print as `NaN`, `inf` and `-inf`
/// rather than collapsing to `null`.
impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheValue::Float(x) if !x.is_finite() => write!(f, "{}", x),
            CacheValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CacheValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", serde_json::Value::from(key.as_str()), value)?;
                }
                write!(f, "}}")
            }
            CacheValue::Object { class, data } => write!(f, "{}({})", class, data),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

// == Conversions ==
impl From<bool> for CacheValue {
    fn from(value: bool) -> Self {
        CacheValue::Bool(value)
    }
}

impl From<i32> for CacheValue {
    fn from(value: i32) -> Self {
        CacheValue::Int(value.into())
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<u32> for CacheValue {
    fn from(value: u32) -> Self {
        CacheValue::Int(value.into())
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::String(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::String(value)
    }
}

impl<T: Into<CacheValue>> From<Vec<T>> for CacheValue {
    fn from(items: Vec<T>) -> Self {
        CacheValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CacheValue>> From<BTreeMap<String, T>> for CacheValue {
    fn from(map: BTreeMap<String, T>) -> Self {
        CacheValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<CacheValue>> From<Option<T>> for CacheValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CacheValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for CacheValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CacheValue::Null,
            Value::Bool(b) => CacheValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CacheValue::Int(i),
                None => CacheValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CacheValue::String(s),
            Value::Array(items) => CacheValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                CacheValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
