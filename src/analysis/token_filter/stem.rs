//! Stemming token filter.
//!
//! The filter delegates to a [`Stemmer`]; the default is the
//! [`PorterStemmer`], matching the engine's `porter_stem` filter.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

pub mod porter;

pub use porter::PorterStemmer;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Filter that applies stemming to tokens.
pub struct StemFilter {
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Porter stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Box::new(PorterStemmer::new()),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmed = tokens
            .map(|token| {
                let stem = self.stemmer.stem(&token.text);
                token.with_text(stem)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(stemmed.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
