//! Token filter implementations for local analysis previews.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`shingle::ShingleFilter`] - Emits token n-grams
//!
//! # Filter Chaining
//!
//! Filters run in the order the analyzer lists them:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer
//! ```

use std::sync::Arc;

use crate::analysis::filter::{FilterKind, FilterSpec, StopWords};
use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod lowercase;
pub mod shingle;
pub mod stem;
pub mod stop;

/// Trait for filters that transform token streams.
///
/// # Examples
///
/// ```
/// use hasta::analysis::token::{Token, TokenStream};
/// use hasta::analysis::token_filter::Filter;
/// use hasta::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|t| {
///             let reversed: String = t.text.chars().rev().collect();
///             t.with_text(reversed)
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}

/// Create the filter implementing a configured filter spec.
pub fn for_spec(spec: &FilterSpec) -> Arc<dyn Filter> {
    match spec.kind() {
        FilterKind::Lowercase => Arc::new(lowercase::LowercaseFilter::new()),
        FilterKind::Stop => match spec.stopwords().unwrap_or(StopWords::English) {
            StopWords::English => Arc::new(stop::StopFilter::new()),
            StopWords::None => Arc::new(stop::StopFilter::from_words(Vec::<String>::new())),
            StopWords::Custom(words) => Arc::new(stop::StopFilter::from_words(words)),
        },
        FilterKind::Stemmer => Arc::new(stem::StemFilter::new()),
        FilterKind::Shingle => Arc::new(shingle::ShingleFilter::new(
            spec.shingle_params().unwrap_or_default(),
        )),
    }
}
