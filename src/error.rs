//! Error types for the Hasta library.
//!
//! All errors are represented by the [`HastaError`] enum. Configuration
//! mistakes (bad rows, unknown filters, invalid filter parameters) are
//! reported by the pure builders and are never retried; transport and engine
//! failures come from the [`SearchBackend`](crate::backend::SearchBackend)
//! boundary.
//!
//! # Examples
//!
//! ```
//! use hasta::error::{HastaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HastaError::invalid_parameter("min_shingle_size must be >= 2"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Hasta operations.
#[derive(Error, Debug)]
pub enum HastaError {
    /// A row that no document content can be derived from.
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// A filter identifier outside the recognized filter kinds.
    #[error("Unknown filter kind: {0}")]
    UnknownFilterKind(String),

    /// A filter or analyzer parameter that fails validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A field mapping that references an analyzer the index does not define.
    #[error("Unknown analyzer: {0}")]
    UnknownAnalyzer(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search engine answered with a non-success status.
    #[error("Backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    /// Some documents of a bulk request were rejected.
    #[error("Bulk index error: {} document(s) failed to index", failed_ids.len())]
    BulkIndex { failed_ids: Vec<u64> },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HastaError.
pub type Result<T> = std::result::Result<T, HastaError>;

impl HastaError {
    /// Create a new invalid row error.
    pub fn invalid_row<S: Into<String>>(msg: S) -> Self {
        HastaError::InvalidRow(msg.into())
    }

    /// Create a new unknown filter kind error.
    pub fn unknown_filter_kind<S: Into<String>>(msg: S) -> Self {
        HastaError::UnknownFilterKind(msg.into())
    }

    /// Create a new invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        HastaError::InvalidParameter(msg.into())
    }

    /// Create a new unknown analyzer error.
    pub fn unknown_analyzer<S: Into<String>>(msg: S) -> Self {
        HastaError::UnknownAnalyzer(msg.into())
    }

    /// Create a new backend error from a response status and body.
    pub fn backend<S: Into<String>>(status: u16, msg: S) -> Self {
        HastaError::Backend {
            status,
            message: msg.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HastaError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HastaError::Other(msg.into())
    }

    /// Whether this error comes from local validation rather than I/O.
    ///
    /// The CLI exits with status 2 for these and 1 for everything else.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HastaError::InvalidRow(_)
                | HastaError::UnknownFilterKind(_)
                | HastaError::InvalidParameter(_)
                | HastaError::UnknownAnalyzer(_)
        )
    }
}
