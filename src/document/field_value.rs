//! Scalar cell values for tabular rows.
//!
//! A [`FieldValue`] is what a single cell of a dataset holds after type
//! inference: text, an integer, a float, a boolean, or null for missing cells.
//!
//! ```
//! use hasta::document::field_value::FieldValue;
//!
//! assert_eq!(FieldValue::infer("2024"), FieldValue::Integer(2024));
//! assert_eq!(FieldValue::infer("19.99"), FieldValue::Float(19.99));
//! assert_eq!(FieldValue::infer(""), FieldValue::Null);
//! assert_eq!(FieldValue::Integer(5).to_text(), Some("5".to_string()));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the value of one column in a row.
///
/// Serializes untagged, so a row renders as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null value (missing or empty cell)
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl FieldValue {
    /// Infer the value type from a raw cell.
    ///
    /// Empty cells become [`FieldValue::Null`]; `true`/`false` (any case)
    /// become booleans; integers are tried before floats; anything else is
    /// text, kept verbatim.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldValue::Null;
        }

        // Try boolean
        if raw.eq_ignore_ascii_case("true") {
            return FieldValue::Boolean(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return FieldValue::Boolean(false);
        }

        // Try integer
        if let Ok(int_val) = raw.parse::<i64>() {
            return FieldValue::Integer(int_val);
        }

        // Try float; "nan"/"inf" parse as floats but are text in a dataset
        if let Ok(float_val) = raw.parse::<f64>()
            && float_val.is_finite()
        {
            return FieldValue::Float(float_val);
        }

        FieldValue::Text(raw.to_string())
    }

    /// Check whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get the value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String form used when flattening a row, `None` for null.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
