//! Row-to-document normalization.
//!
//! The [`DocumentNormalizer`] turns one tabular [`Row`] into a [`Document`]
//! with a single `content` field, so that every row indexes into the same
//! mapping regardless of the dataset's columns.
//!
//! # Rules
//!
//! 1. A row with no columns is rejected with [`HastaError::InvalidRow`].
//! 2. If the row has a column named like the reserved field (`content` by
//!    default) holding a non-null value, that value's string form is the
//!    content, verbatim.
//! 3. Otherwise the content is the string form of every non-null value, in
//!    column order, joined by a single space. A null reserved column falls
//!    into this case and is skipped like any other null.
//!
//! # Examples
//!
//! ```
//! use hasta::document::normalizer::normalize;
//! use hasta::document::row::Row;
//! use hasta::document::field_value::FieldValue;
//!
//! let row = Row::new()
//!     .with("a", "x")
//!     .with("b", FieldValue::Null)
//!     .with("c", "y");
//!
//! let doc = normalize(&row, 0).unwrap();
//! assert_eq!(doc.content, "x y");
//! ```

use log::debug;

use crate::document::document::Document;
use crate::document::row::Row;
use crate::error::{HastaError, Result};

/// Name of the column that, when present, supplies the content verbatim.
pub const DEFAULT_CONTENT_FIELD: &str = "content";

/// Converts rows into single-field documents.
#[derive(Debug, Clone)]
pub struct DocumentNormalizer {
    reserved_field: String,
}

impl Default for DocumentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentNormalizer {
    /// Create a normalizer that reserves the `content` column.
    pub fn new() -> Self {
        DocumentNormalizer {
            reserved_field: DEFAULT_CONTENT_FIELD.to_string(),
        }
    }

    /// Use a different reserved column name.
    pub fn with_reserved_field<S: Into<String>>(mut self, name: S) -> Self {
        self.reserved_field = name.into();
        self
    }

    /// Get the reserved column name.
    pub fn reserved_field(&self) -> &str {
        &self.reserved_field
    }

    /// Normalize a single row found at `position` in its dataset.
    pub fn normalize(&self, row: &Row, position: u64) -> Result<Document> {
        if row.is_empty() {
            return Err(HastaError::invalid_row(format!(
                "row {position} has no columns"
            )));
        }

        if let Some(content) = row
            .get(&self.reserved_field)
            .and_then(|value| value.to_text())
        {
            return Ok(Document::new(position, content));
        }

        let content = row
            .values()
            .filter_map(|value| value.to_text())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Document::new(position, content))
    }

    /// Normalize rows in order, using each row's iteration position as its id.
    ///
    /// Stops at the first row that cannot be normalized.
    pub fn normalize_rows<'a, I>(&self, rows: I) -> Result<Vec<Document>>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let documents = rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| self.normalize(row, position as u64))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "normalized {} rows into documents (reserved field '{}')",
            documents.len(),
            self.reserved_field
        );
        Ok(documents)
    }
}

/// Normalize a row with the default `content` reserved field.
pub fn normalize(row: &Row, position: u64) -> Result<Document> {
    DocumentNormalizer::new().normalize(row, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::field_value::FieldValue;

    #[test]
    fn test_flattens_in_column_order() {
        let row = Row::new()
            .with("a", "Singapore")
            .with("b", "tourist")
            .with("c", 5_i64);
        let doc = normalize(&row, 0).unwrap();
        assert_eq!(doc.content, "Singapore tourist 5");
        assert_eq!(doc.id, 0);
    }

    #[test]
    fn test_column_order_is_not_sorted() {
        let row = Row::new().with("z", "first").with("a", "second");
        assert_eq!(normalize(&row, 0).unwrap().content, "first second");
    }

    #[test]
    fn test_skips_nulls() {
        let row = Row::new()
            .with("a", "x")
            .with("b", FieldValue::Null)
            .with("c", "y");
        let doc = normalize(&row, 3).unwrap();
        assert_eq!(doc.content, "x y");
        assert!(!doc.content.contains("None"));
        assert!(!doc.content.contains("null"));
    }

    #[test]
    fn test_all_null_row_gives_empty_content() {
        let row = Row::new().with("a", FieldValue::Null);
        assert_eq!(normalize(&row, 0).unwrap().content, "");
    }

    #[test]
    fn test_content_column_wins() {
        let row = Row::new()
            .with("title", "ignored")
            .with("content", "the real text")
            .with("year", 2014_i64);
        assert_eq!(normalize(&row, 0).unwrap().content, "the real text");
    }

    #[test]
    fn test_content_column_is_verbatim() {
        let row = Row::new().with("content", "  spaced   out  ");
        assert_eq!(normalize(&row, 0).unwrap().content, "  spaced   out  ");
    }

    #[test]
    fn test_null_content_column_falls_back_to_flattening() {
        let row = Row::new()
            .with("title", "Hello")
            .with("content", FieldValue::Null)
            .with("year", 2014_i64);
        assert_eq!(normalize(&row, 0).unwrap().content, "Hello 2014");
    }

    #[test]
    fn test_custom_reserved_field() {
        let normalizer = DocumentNormalizer::new().with_reserved_field("body");
        let row = Row::new().with("content", "not reserved").with("body", "text");
        assert_eq!(normalizer.normalize(&row, 0).unwrap().content, "text");
    }

    #[test]
    fn test_empty_row_is_rejected() {
        let result = normalize(&Row::new(), 4);
        assert!(matches!(result, Err(HastaError::InvalidRow(_))));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let row = Row::new().with("a", "x").with("b", 1.5_f64);
        assert_eq!(normalize(&row, 1).unwrap(), normalize(&row, 1).unwrap());
    }

    #[test]
    fn test_normalize_rows_assigns_positions() {
        let rows = vec![
            Row::new().with("a", "first"),
            Row::new().with("a", "second"),
        ];
        let docs = DocumentNormalizer::new().normalize_rows(&rows).unwrap();
        assert_eq!(docs[0], Document::new(0, "first"));
        assert_eq!(docs[1], Document::new(1, "second"));
    }

    #[test]
    fn test_normalize_rows_stops_on_empty_row() {
        let rows = vec![Row::new().with("a", "first"), Row::new()];
        let result = DocumentNormalizer::new().normalize_rows(&rows);
        assert!(matches!(result, Err(HastaError::InvalidRow(msg)) if msg.contains("row 1")));
    }
}
