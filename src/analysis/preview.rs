//! Offline analyzer chains.
//!
//! A [`PreviewAnalyzer`] runs an [`AnalyzerSpec`] locally so an analyzer
//! configuration can be inspected without a running cluster. The tokenizer
//! and every filter are built from the spec and applied in the spec's order:
//!
//! ```text
//! text → Tokenizer → Filter 1 → Filter 2 → ... → tokens
//! ```
//!
//! The preview approximates what the engine's `_analyze` API returns for the
//! same chain; the engine stays authoritative.
//!
//! # Examples
//!
//! ```
//! use hasta::analysis::analyzer::build_analyzer;
//! use hasta::analysis::preview::PreviewAnalyzer;
//!
//! let spec = build_analyzer("stem_analyzer", "standard", ["lowercase", "porter_stem"]).unwrap();
//! let analyzer = PreviewAnalyzer::from_spec(&spec);
//!
//! let terms = analyzer.terms("The buses were running").unwrap();
//! assert_eq!(terms, vec!["the", "buse", "were", "run"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::AnalyzerSpec;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::{self, Filter};
use crate::analysis::tokenizer::{self, Tokenizer};
use crate::error::Result;

/// A tokenizer combined with a chain of filters.
#[derive(Clone)]
pub struct PreviewAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PreviewAnalyzer {
    /// Create a new analyzer with the given tokenizer and no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PreviewAnalyzer {
            name: format!("preview_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Build the local chain for an analyzer spec.
    pub fn from_spec(spec: &AnalyzerSpec) -> Self {
        spec.filters()
            .iter()
            .fold(
                PreviewAnalyzer::new(tokenizer::for_kind(spec.tokenizer())),
                |analyzer, filter| analyzer.add_filter(token_filter::for_spec(filter)),
            )
            .with_name(spec.name())
    }

    /// Add a filter to the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the analyzer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Analyze text into a token stream.
    pub fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    /// Analyze text and collect the tokens.
    pub fn tokens(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.analyze(text)?.collect())
    }

    /// Analyze text and collect only the token texts.
    pub fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|t| t.text).collect())
    }
}

impl std::fmt::Debug for PreviewAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
