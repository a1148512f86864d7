//! The search engine boundary.
//!
//! Everything that talks to a running engine goes through the
//! [`SearchBackend`] trait. Callers receive the backend as an explicit
//! handle (`&dyn SearchBackend`) rather than reaching for a global client,
//! which also lets tests substitute an in-memory double.
//!
//! Replacing an index is a single operation here: the backend validates the
//! definition, deletes an existing index of the same name and creates the new
//! one, so call sites never repeat the "delete if exists, then create" dance.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::index::IndexDefinition;
use crate::document::Document;
use crate::error::{HastaError, Result};
use crate::query::Query;

pub mod config;
pub mod elasticsearch;

pub use config::BackendConfig;
pub use elasticsearch::ElasticsearchBackend;

/// A document the engine refused during bulk ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    /// Id of the rejected document (its row position).
    pub id: u64,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Engine-provided reason.
    pub reason: String,
}

/// Per-document outcome of a bulk request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    /// Number of documents the engine accepted.
    pub indexed: usize,
    /// Documents the engine rejected.
    pub failures: Vec<BulkFailure>,
}

impl BulkReport {
    /// Whether every document was accepted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Ids of the rejected documents.
    pub fn failed_ids(&self) -> Vec<u64> {
        self.failures.iter().map(|f| f.id).collect()
    }

    /// Turn partial failure into [`HastaError::BulkIndex`].
    pub fn into_result(self) -> Result<BulkReport> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(HastaError::BulkIndex {
                failed_ids: self.failed_ids(),
            })
        }
    }
}

/// One token returned by the engine's analyze API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub token: String,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(rename = "type")]
    pub token_type: String,
    pub position: usize,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub score: Option<f64>,
    pub content: Option<String>,
}

/// The result of a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total number of matching documents.
    pub total: u64,
    /// Returned hits, best first.
    pub hits: Vec<Hit>,
}

/// Operations the pipeline needs from a search engine.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Check that the engine is reachable.
    async fn ping(&self) -> Result<()>;

    /// Validate `index`, delete any index with its name, then create it.
    async fn replace_index(&self, index: &IndexDefinition) -> Result<()>;

    /// Index documents in one bulk request.
    ///
    /// Rejections of individual documents are reported in the returned
    /// [`BulkReport`], not as an error.
    async fn bulk_index(&self, index: &str, documents: &[Document]) -> Result<BulkReport>;

    /// Run `text` through a named analyzer of `index`.
    async fn analyze(&self, index: &str, analyzer: &str, text: &str) -> Result<Vec<AnalyzedToken>>;

    /// Execute a query against `index`.
    async fn search(&self, index: &str, query: &Query) -> Result<SearchResults>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_report_success() {
        let report = BulkReport {
            indexed: 3,
            failures: Vec::new(),
        };
        assert!(report.is_success());
        assert_eq!(report.into_result().unwrap().indexed, 3);
    }

    #[test]
    fn test_bulk_report_partial_failure() {
        let report = BulkReport {
            indexed: 1,
            failures: vec![
                BulkFailure {
                    id: 4,
                    status: 400,
                    reason: "mapper_parsing_exception".to_string(),
                },
                BulkFailure {
                    id: 9,
                    status: 429,
                    reason: "es_rejected_execution_exception".to_string(),
                },
            ],
        };
        match report.into_result() {
            Err(HastaError::BulkIndex { failed_ids }) => assert_eq!(failed_ids, vec![4, 9]),
            other => panic!("expected bulk error, got {other:?}"),
        }
    }
}
