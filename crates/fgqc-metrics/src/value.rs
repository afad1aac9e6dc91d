//! Typed scalar values and per-column type coercion.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Declared type of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Whole number (counts, family sizes)
    Integer,
    /// Floating point number (fractions)
    Float,
    /// Anything not listed in a report's column table
    Text,
}

/// A field that could not be converted to its column's declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot convert '{value}' in column '{column}' to {expected}")]
pub struct CoercionError {
    /// The column the field belongs to
    pub column: String,
    /// The raw field text
    pub value: String,
    /// Name of the type the column is declared as
    pub expected: &'static str,
}

impl ColumnType {
    /// Human-readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }

    /// Converts raw field text into a [`Value`] of this type.
    ///
    /// Surrounding whitespace is ignored for numeric columns. Text columns keep the field
    /// verbatim.
    ///
    /// # Errors
    /// Returns a [`CoercionError`] if the text is not a valid number of this type.
    ///
    /// # Example
    /// ```
    /// use fgqc_metrics::{ColumnType, Value};
    ///
    /// assert_eq!(ColumnType::Integer.coerce("ss_count", "10").unwrap(), Value::Integer(10));
    /// assert!(ColumnType::Integer.coerce("ss_count", "0.5").is_err());
    /// ```
    pub fn coerce(self, column: &str, raw: &str) -> Result<Value, CoercionError> {
        let err = || CoercionError {
            column: column.to_string(),
            value: raw.to_string(),
            expected: self.name(),
        };
        match self {
            Self::Integer => raw.trim().parse::<i64>().map(Value::Integer).map_err(|_| err()),
            Self::Float => raw.trim().parse::<f64>().map(Value::Float).map_err(|_| err()),
            Self::Text => Ok(Value::Text(raw.to_string())),
        }
    }
}

/// A single typed field of a report row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// The integer payload, if this is an integer value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The numeric payload widened to `f64`; `None` for text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
        }
    }
}
