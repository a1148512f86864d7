//! Document module for row-to-document preparation.
//!
//! This module provides the tabular [`Row`] type read from datasets, the
//! single-field [`Document`] handed to bulk ingestion, and the
//! [`DocumentNormalizer`] that turns one into the other.

pub mod converter;
#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;
pub mod normalizer;
pub mod row;

// Re-export commonly used types
pub use document::Document;
pub use field_value::FieldValue;
pub use normalizer::{DEFAULT_CONTENT_FIELD, DocumentNormalizer, normalize};
pub use row::Row;
