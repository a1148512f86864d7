//! Analyzer chain configuration and local analysis.
//!
//! The configuration side ([`analyzer`], [`filter`], [`index`]) builds and
//! validates the analyzer definitions an index is created with. The
//! [`preview`] side runs the same chains offline through the
//! [`tokenizer`] and [`token_filter`] implementations.

pub mod analyzer;
pub mod filter;
pub mod index;
pub mod preview;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{AnalyzerBuilder, AnalyzerSpec, TokenizerKind, build_analyzer};
pub use filter::{FilterDefinition, FilterKind, FilterSpec, ShingleParams, StopWords};
pub use index::{FieldMapping, IndexDefinition, validate_index_name};
pub use preview::PreviewAnalyzer;
