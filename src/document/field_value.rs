//! Field value types for documents.
//!
//! This module defines the [`FieldValue`] enum which represents every value
//! a flattened document field can hold: scalars, ordered sequences, and
//! flattened sub-documents.
//!
//! # Supported Types
//!
//! - **Text** - String data
//! - **Integer** - 64-bit signed integers
//! - **Float** - 64-bit floating-point numbers
//! - **Boolean** - true/false values
//! - **DateTime** - UTC timestamps
//! - **List** - Ordered sequence of values (scalars or sub-documents)
//! - **Map** - A flattened sub-document
//! - **Null** - Explicit null values
//!
//! Deserialized strings are always [`FieldValue::Text`]; use
//! [`FieldValue::as_datetime`] to read them back as timestamps.
//!
//! ```
//! use solrmap::document::field_value::FieldValue;
//!
//! let text = FieldValue::from("Rust Programming");
//! assert_eq!(text.as_text(), Some("Rust Programming"));
//!
//! let tags = FieldValue::from(vec!["rust", "search"]);
//! assert_eq!(tags.as_list().map(|l| l.len()), Some(2));
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A flattened sub-document: alias to value, in mapping order.
pub type FieldMap = IndexMap<String, FieldValue>;

/// Represents a value for a field in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// DateTime value
    DateTime(DateTime<Utc>),
    /// Ordered sequence of values
    List(Vec<FieldValue>),
    /// Flattened sub-document
    Map(FieldMap),
}

impl FieldValue {
    /// Get the value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a UTC timestamp. RFC 3339 text is parsed.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Get the value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as an ordered sequence.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Get the value as a flattened sub-document.
    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert into a JSON value for the transport.
    ///
    /// DateTimes are rendered in RFC 3339 with a `Z` suffix.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            }
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::List(values) => Value::Array(values.iter().map(|v| v.to_json()).collect()),
            FieldValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(value: FieldMap) -> Self {
        FieldValue::Map(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
