//! Ordered tabular rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::document::field_value::FieldValue;

/// One record of an input dataset: an ordered mapping from column name to
/// a scalar value.
///
/// Column order is the order in which columns were added (for CSV input,
/// the header order) and is never changed afterwards.
///
/// # Examples
///
/// ```
/// use hasta::document::row::Row;
/// use hasta::document::field_value::FieldValue;
///
/// let row = Row::new()
///     .with("a", "Singapore")
///     .with("b", FieldValue::Null)
///     .with("c", 5_i64);
///
/// assert_eq!(row.len(), 3);
/// assert_eq!(row.column_names(), vec!["a", "b", "c"]);
/// assert!(row.get("b").unwrap().is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, FieldValue)>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Row {
            columns: Vec::new(),
        }
    }

    /// Append a column to the row.
    pub fn push<S: Into<String>, V: Into<FieldValue>>(&mut self, name: S, value: V) {
        self.columns.push((name.into(), value.into()));
    }

    /// Append a column, builder style.
    pub fn with<S: Into<String>, V: Into<FieldValue>>(mut self, name: S, value: V) -> Self {
        self.push(name, value);
        self
    }

    /// Get the value of the first column with the given name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Check if the row has a column with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.columns.iter().map(|(_, value)| value)
    }

    /// Iterate over `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>, V: Into<FieldValue>> FromIterator<(S, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Row {
            columns: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
