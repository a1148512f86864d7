//! # hasta
//!
//! Analyzer chain configuration and document preparation for full-text
//! search engines.
//!
//! ## Features
//!
//! - Row-to-document normalization into a single `content` field
//! - Validated analyzer chains (tokenizer plus ordered filters)
//! - Index definitions rendered to index-creation bodies
//! - Local preview of analyzer chains without a cluster
//! - An Elasticsearch backend for index replacement, bulk ingestion,
//!   analysis and queries

pub mod analysis;
pub mod backend;
pub mod cli;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod scenario;

pub mod prelude {
    pub use crate::analysis::{
        AnalyzerSpec, FilterDefinition, IndexDefinition, PreviewAnalyzer, build_analyzer,
    };
    pub use crate::backend::{BackendConfig, ElasticsearchBackend, SearchBackend};
    pub use crate::document::{Document, DocumentNormalizer, FieldValue, Row, normalize};
    pub use crate::error::{HastaError, Result};
    pub use crate::pipeline::{ScenarioReport, run_scenario};
    pub use crate::query::Query;
    pub use crate::scenario::Scenario;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
