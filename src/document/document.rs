//! Indexable document structure.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A single document ready for bulk ingestion.
///
/// A document carries exactly one meaningful field, `content`, plus the
/// position of the row it was derived from. The id is what lets a caller
/// correlate a failed bulk item back to its source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Row position in the source dataset (0-based).
    pub id: u64,
    /// Flattened text content. Never null.
    pub content: String,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(id: u64, content: S) -> Self {
        Document {
            id,
            content: content.into(),
        }
    }

    /// The `_source` body sent to the engine.
    pub fn source(&self) -> Value {
        json!({ "content": self.content })
    }
}
