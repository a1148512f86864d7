//! Analyzer chain configuration.
//!
//! An [`AnalyzerSpec`] is a named pipeline of exactly one tokenizer followed
//! by an ordered list of token filters. It is pure configuration: building one
//! never contacts a search engine. The spec is attached to an
//! [`IndexDefinition`](crate::analysis::index::IndexDefinition) and later
//! referenced by name at analysis and query time.
//!
//! # Filter order
//!
//! Filters apply left to right over the tokenizer's output, so order changes
//! the produced tokens. The builder keeps filters exactly in the order given
//! and never reorders them. In particular, case folding has to come before
//! stemming for the stemmer to see lowercase forms; that is the caller's
//! choice to make.
//!
//! # Examples
//!
//! ```
//! use hasta::analysis::analyzer::build_analyzer;
//!
//! let analyzer = build_analyzer(
//!     "custom_analyzer",
//!     "standard",
//!     ["lowercase", "stop", "porter_stem"],
//! )
//! .unwrap();
//!
//! assert_eq!(analyzer.filter_names(), vec!["lowercase", "stop", "porter_stem"]);
//! ```
//!
//! With a parameterized filter, using the builder:
//!
//! ```
//! use hasta::analysis::analyzer::AnalyzerSpec;
//! use serde_json::json;
//!
//! let analyzer = AnalyzerSpec::builder("keyword_selector")
//!     .tokenizer("standard")
//!     .filter("lowercase")
//!     .filter("stop")
//!     .custom_filter(
//!         "my_shingle",
//!         json!({ "type": "shingle", "min_shingle_size": 2, "max_shingle_size": 3 }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(analyzer.filter_names(), vec!["lowercase", "stop", "my_shingle"]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::analysis::filter::{FilterDefinition, FilterSpec};
use crate::error::{HastaError, Result};

/// The tokenizers an analyzer chain may start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Unicode word boundaries (UAX #29).
    Standard,
    /// Splits on whitespace.
    Whitespace,
    /// Splits on anything that is not a letter.
    Letter,
    /// The whole input as a single token.
    Keyword,
}

impl TokenizerKind {
    /// Resolve a tokenizer identifier.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        match identifier {
            "standard" => Ok(TokenizerKind::Standard),
            "whitespace" => Ok(TokenizerKind::Whitespace),
            "letter" => Ok(TokenizerKind::Letter),
            "keyword" => Ok(TokenizerKind::Keyword),
            "" => Err(HastaError::invalid_parameter(
                "an analyzer needs a tokenizer",
            )),
            other => Err(HastaError::invalid_parameter(format!(
                "unknown tokenizer '{other}'"
            ))),
        }
    }

    /// The identifier used in index settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerKind::Standard => "standard",
            TokenizerKind::Whitespace => "whitespace",
            TokenizerKind::Letter => "letter",
            TokenizerKind::Keyword => "keyword",
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, named analyzer chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSpec {
    name: String,
    tokenizer: TokenizerKind,
    filters: Vec<FilterSpec>,
}

/// Build and validate an analyzer chain.
///
/// Fails with [`HastaError::UnknownFilterKind`] for a filter outside the
/// recognized kinds and with [`HastaError::InvalidParameter`] for bad filter
/// parameters, an empty name, or an unknown tokenizer.
pub fn build_analyzer<N, I, F>(name: N, tokenizer: &str, filters: I) -> Result<AnalyzerSpec>
where
    N: Into<String>,
    I: IntoIterator<Item = F>,
    F: Into<FilterDefinition>,
{
    let name = name.into();
    if name.trim().is_empty() {
        return Err(HastaError::invalid_parameter("analyzer name is empty"));
    }

    let tokenizer = TokenizerKind::from_identifier(tokenizer)?;

    let mut specs: Vec<FilterSpec> = Vec::new();
    for definition in filters {
        let spec = FilterSpec::from_definition(&definition.into())?;
        if let Some(existing) = specs.iter().find(|s| s.name() == spec.name())
            && existing != &spec
        {
            return Err(HastaError::invalid_parameter(format!(
                "filter '{}' is defined twice with different parameters",
                spec.name()
            )));
        }
        specs.push(spec);
    }

    Ok(AnalyzerSpec {
        name,
        tokenizer,
        filters: specs,
    })
}

impl AnalyzerSpec {
    /// Start building an analyzer called `name`.
    pub fn builder<S: Into<String>>(name: S) -> AnalyzerBuilder {
        AnalyzerBuilder::new(name)
    }

    /// The analyzer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tokenizer.
    pub fn tokenizer(&self) -> TokenizerKind {
        self.tokenizer
    }

    /// Filters in application order.
    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    /// Filter names in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Filters that need their own definition in the index settings.
    pub fn custom_filters(&self) -> impl Iterator<Item = &FilterSpec> {
        self.filters.iter().filter(|f| f.is_custom())
    }

    /// The analyzer definition object for `settings.analysis.analyzer`.
    pub fn to_json(&self) -> Value {
        json!({
            "type": "custom",
            "tokenizer": self.tokenizer.as_str(),
            "filter": self.filter_names(),
        })
    }
}

/// Builder for [`AnalyzerSpec`], validated on [`build`](AnalyzerBuilder::build).
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder {
    name: String,
    tokenizer: String,
    filters: Vec<FilterDefinition>,
}

impl AnalyzerBuilder {
    /// Create a builder with the `standard` tokenizer and no filters.
    pub fn new<S: Into<String>>(name: S) -> Self {
        AnalyzerBuilder {
            name: name.into(),
            tokenizer: TokenizerKind::Standard.as_str().to_string(),
            filters: Vec::new(),
        }
    }

    /// Set the tokenizer identifier.
    pub fn tokenizer<S: Into<String>>(mut self, tokenizer: S) -> Self {
        self.tokenizer = tokenizer.into();
        self
    }

    /// Append a built-in filter by identifier.
    pub fn filter<S: Into<String>>(mut self, identifier: S) -> Self {
        self.filters.push(FilterDefinition::named(identifier));
        self
    }

    /// Append a custom filter with parameters.
    pub fn custom_filter<S: Into<String>>(mut self, name: S, params: Value) -> Self {
        self.filters.push(FilterDefinition::with_params(name, params));
        self
    }

    /// Validate and build the analyzer.
    pub fn build(self) -> Result<AnalyzerSpec> {
        build_analyzer(self.name, &self.tokenizer, self.filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter::FilterKind;

    #[test]
    fn test_filter_order_is_preserved() {
        let analyzer =
            build_analyzer("a", "standard", ["lowercase", "stop", "porter_stem"]).unwrap();
        assert_eq!(
            analyzer.filter_names(),
            vec!["lowercase", "stop", "porter_stem"]
        );

        let reversed =
            build_analyzer("a", "standard", ["porter_stem", "stop", "lowercase"]).unwrap();
        assert_eq!(
            reversed.filter_names(),
            vec!["porter_stem", "stop", "lowercase"]
        );
    }

    #[test]
    fn test_identity_pipeline() {
        let analyzer = build_analyzer("plain", "whitespace", Vec::<&str>::new()).unwrap();
        assert!(analyzer.filters().is_empty());
        assert_eq!(analyzer.tokenizer(), TokenizerKind::Whitespace);
        assert_eq!(
            analyzer.to_json(),
            json!({ "type": "custom", "tokenizer": "whitespace", "filter": [] })
        );
    }

    #[test]
    fn test_unknown_filter() {
        let result = build_analyzer("a", "standard", ["lowercase", "nonexistent_filter"]);
        assert!(matches!(result, Err(HastaError::UnknownFilterKind(_))));
    }

    #[test]
    fn test_shingle_min_greater_than_max() {
        let result = AnalyzerSpec::builder("a")
            .custom_filter("my_shingle", json!({ "type": "shingle", "min": 3, "max": 2 }))
            .build();
        assert!(matches!(result, Err(HastaError::InvalidParameter(_))));
    }

    #[test]
    fn test_missing_tokenizer() {
        let result = build_analyzer("a", "", ["lowercase"]);
        assert!(matches!(result, Err(HastaError::InvalidParameter(_))));

        let result = build_analyzer("a", "icu_tokenizer", ["lowercase"]);
        assert!(matches!(result, Err(HastaError::InvalidParameter(_))));
    }

    #[test]
    fn test_empty_name() {
        let result = build_analyzer("  ", "standard", ["lowercase"]);
        assert!(matches!(result, Err(HastaError::InvalidParameter(_))));
    }

    #[test]
    fn test_conflicting_custom_filters() {
        let result = AnalyzerSpec::builder("a")
            .custom_filter("my_shingle", json!({ "type": "shingle", "max": 3 }))
            .custom_filter("my_shingle", json!({ "type": "shingle", "max": 4 }))
            .build();
        assert!(matches!(result, Err(HastaError::InvalidParameter(_))));
    }

    #[test]
    fn test_repeated_builtin_is_allowed() {
        let analyzer = build_analyzer("a", "standard", ["lowercase", "lowercase"]).unwrap();
        assert_eq!(analyzer.filters().len(), 2);
    }

    #[test]
    fn test_custom_filters() {
        let analyzer = AnalyzerSpec::builder("keyword_selector")
            .filter("lowercase")
            .filter("stop")
            .custom_filter(
                "my_shingle",
                json!({ "type": "shingle", "min_shingle_size": 2, "max_shingle_size": 3 }),
            )
            .build()
            .unwrap();

        let custom: Vec<_> = analyzer.custom_filters().map(|f| f.name()).collect();
        assert_eq!(custom, vec!["my_shingle"]);
        assert_eq!(analyzer.filters()[2].kind(), FilterKind::Shingle);
        assert_eq!(
            analyzer.to_json(),
            json!({
                "type": "custom",
                "tokenizer": "standard",
                "filter": ["lowercase", "stop", "my_shingle"],
            })
        );
    }
}
