//! Built-in demonstration scenarios.
//!
//! Each scenario is one index configuration together with a sample text to
//! run through its analyzer and the queries to issue once data is indexed:
//!
//! | name       | index               | analyzer                | filters                            |
//! |------------|---------------------|-------------------------|------------------------------------|
//! | `basic`    | `articles`          | engine default          |                                    |
//! | `token`    | `articles_token`    | `my_lowercase_analyzer` | lowercase                          |
//! | `stemming` | `articles_stemming` | `stem_analyzer`         | lowercase, porter_stem             |
//! | `keywords` | `articles_keywords` | `keyword_selector`      | lowercase, stop, my_shingle (2..3) |
//! | `pipeline` | `articles_pipeline` | `custom_analyzer`       | lowercase, stop, porter_stem       |

use serde::Serialize;
use serde_json::json;

use crate::analysis::analyzer::{AnalyzerSpec, build_analyzer};
use crate::analysis::index::IndexDefinition;
use crate::analysis::preview::PreviewAnalyzer;
use crate::document::DEFAULT_CONTENT_FIELD;
use crate::error::{HastaError, Result};
use crate::query::Query;

/// Sentence showing how stemming conflates inflected forms.
pub const BUS_SENTENCE: &str = "The buses were running while the bus driver drove the busses.";

/// Sentence showing case folding.
pub const FOX_SENTENCE: &str = "The Quick Brown Fox Jumps Over The Lazy Dog.";

/// An HTML paragraph for keyword (shingle) extraction.
pub const SALTON_PARAGRAPH: &str = concat!(
    "<p><b>Gerard Salton</b> (8 March 1927 in <a href=\"/wiki/Nuremberg\" title=\"Nuremberg\">Nuremberg</a> - 28 August 1995), ",
    "also known as Gerry Salton, was a Professor of <a href=\"/wiki/Computer_Science\" title=\"Computer Science\" class=\"mw-redirect\">",
    "Computer Science</a> at <a href=\"/wiki/Cornell_University\" title=\"Cornell University\">Cornell University</a>. ",
    "Salton was perhaps the leading computer scientist working in the field of <a href=\"/wiki/Information_retrieval\" ",
    "title=\"Information retrieval\">information retrieval</a> during his time."
);

/// Names of the built-in scenarios.
pub const SCENARIO_NAMES: [&str; 5] = ["basic", "token", "stemming", "keywords", "pipeline"];

/// A query with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedQuery {
    pub description: String,
    pub query: Query,
}

impl NamedQuery {
    pub fn new<S: Into<String>>(description: S, query: Query) -> Self {
        NamedQuery {
            description: description.into(),
            query,
        }
    }
}

/// One index configuration and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub index: IndexDefinition,
    /// Analyzer to run the sample text through; `None` skips analysis.
    pub analyzer: Option<String>,
    pub sample_text: Option<String>,
    pub queries: Vec<NamedQuery>,
    /// Whether the scenario is meant to run over an indexed dataset.
    pub uses_dataset: bool,
}

impl Scenario {
    /// Look up a built-in scenario by name.
    pub fn by_name(name: &str) -> Result<Scenario> {
        match name {
            "basic" => Self::basic(),
            "token" => Self::token(),
            "stemming" => Self::stemming(),
            "keywords" => Self::keywords(),
            "pipeline" => Self::pipeline(),
            other => Err(HastaError::config(format!(
                "unknown scenario '{other}', expected one of: {}",
                SCENARIO_NAMES.join(", ")
            ))),
        }
    }

    /// All built-in scenarios.
    pub fn all() -> Result<Vec<Scenario>> {
        SCENARIO_NAMES.iter().map(|name| Self::by_name(name)).collect()
    }

    /// Default-analyzed `articles` index with the demonstration queries.
    pub fn basic() -> Result<Scenario> {
        Ok(Scenario {
            name: "basic".to_string(),
            description: "Default analysis, dataset indexed and queried".to_string(),
            index: IndexDefinition::new("articles"),
            analyzer: None,
            sample_text: None,
            queries: demo_queries(),
            uses_dataset: true,
        })
    }

    /// Case folding only.
    pub fn token() -> Result<Scenario> {
        let analyzer = build_analyzer("my_lowercase_analyzer", "standard", ["lowercase"])?;
        Ok(Self::analysis_only(
            "token",
            "Standard tokenizer with case folding",
            "articles_token",
            analyzer,
            FOX_SENTENCE,
        ))
    }

    /// Case folding then Porter stemming.
    pub fn stemming() -> Result<Scenario> {
        let analyzer = build_analyzer("stem_analyzer", "standard", ["lowercase", "porter_stem"])?;
        Ok(Self::analysis_only(
            "stemming",
            "Case folding followed by Porter stemming",
            "articles_stemming",
            analyzer,
            BUS_SENTENCE,
        ))
    }

    /// Stopword removal and 2-3 token shingles for keyword extraction.
    pub fn keywords() -> Result<Scenario> {
        let analyzer = AnalyzerSpec::builder("keyword_selector")
            .tokenizer("standard")
            .filter("lowercase")
            .filter("stop")
            .custom_filter(
                "my_shingle",
                json!({
                    "type": "shingle",
                    "min_shingle_size": 2,
                    "max_shingle_size": 3,
                    "output_unigrams": true
                }),
            )
            .build()?;
        Ok(Self::analysis_only(
            "keywords",
            "Stopword removal with 2-3 token shingles",
            "articles_keywords",
            analyzer,
            SALTON_PARAGRAPH,
        ))
    }

    /// The full pipeline: custom analyzer, dataset, analysis and queries.
    pub fn pipeline() -> Result<Scenario> {
        let analyzer = build_analyzer(
            "custom_analyzer",
            "standard",
            ["lowercase", "stop", "porter_stem"],
        )?;
        let mut scenario = Self::analysis_only(
            "pipeline",
            "Case folding, stopword removal and stemming over the dataset",
            "articles_pipeline",
            analyzer,
            BUS_SENTENCE,
        );
        scenario.queries = demo_queries();
        scenario.uses_dataset = true;
        Ok(scenario)
    }

    fn analysis_only(
        name: &str,
        description: &str,
        index: &str,
        analyzer: AnalyzerSpec,
        sample_text: &str,
    ) -> Scenario {
        let analyzer_name = analyzer.name().to_string();
        Scenario {
            name: name.to_string(),
            description: description.to_string(),
            index: IndexDefinition::new(index)
                .add_analyzer(analyzer)
                .map_field(DEFAULT_CONTENT_FIELD, analyzer_name.clone()),
            analyzer: Some(analyzer_name),
            sample_text: Some(sample_text.to_string()),
            queries: Vec::new(),
            uses_dataset: false,
        }
    }

    /// A local approximation of the analyzer this scenario indexes `content` with.
    ///
    /// Scenarios without a custom analyzer get the engine's `standard`
    /// analyzer (standard tokenizer plus lowercase).
    pub fn preview_analyzer(&self) -> Result<PreviewAnalyzer> {
        if let Some(spec) = self.index.field_analyzer(DEFAULT_CONTENT_FIELD) {
            return Ok(PreviewAnalyzer::from_spec(spec));
        }
        let standard = build_analyzer("standard", "standard", ["lowercase"])?;
        Ok(PreviewAnalyzer::from_spec(&standard))
    }
}

/// The three demonstration queries over `content`.
pub fn demo_queries() -> Vec<NamedQuery> {
    vec![
        NamedQuery::new(
            "Match 'Singapore'",
            Query::matching(DEFAULT_CONTENT_FIELD, "Singapore"),
        ),
        NamedQuery::new(
            "Boolean 'Indonesian' AND 'tourist'",
            Query::all_of(DEFAULT_CONTENT_FIELD, ["Indonesian", "tourist"]),
        ),
        NamedQuery::new(
            "Phrase 'Indonesian tourist'",
            Query::phrase(DEFAULT_CONTENT_FIELD, "Indonesian tourist"),
        ),
    ]
}
