//! Integration tests for analyzer chains, index definitions and local preview.

use hasta::analysis::*;
use hasta::error::{HastaError, Result};
use serde_json::json;

#[test]
fn test_pipeline_index_body() -> Result<()> {
    let analyzer = build_analyzer(
        "custom_analyzer",
        "standard",
        ["lowercase", "stop", "porter_stem"],
    )?;
    let index = IndexDefinition::new("articles_pipeline")
        .add_analyzer(analyzer)
        .map_field("content", "custom_analyzer");

    assert_eq!(
        index.to_body()?,
        json!({
            "settings": {
                "analysis": {
                    "analyzer": {
                        "custom_analyzer": {
                            "type": "custom",
                            "tokenizer": "standard",
                            "filter": ["lowercase", "stop", "porter_stem"]
                        }
                    }
                }
            },
            "mappings": {
                "properties": {
                    "content": { "type": "text", "analyzer": "custom_analyzer" }
                }
            }
        })
    );

    Ok(())
}

#[test]
fn test_mapping_to_undefined_analyzer() -> Result<()> {
    let analyzer = build_analyzer("stem_analyzer", "standard", ["lowercase", "porter_stem"])?;
    let index = IndexDefinition::new("articles_stemming")
        .add_analyzer(analyzer)
        .map_field("content", "missing_analyzer");

    assert!(matches!(index.validate(), Err(HastaError::UnknownAnalyzer(_))));
    assert!(matches!(index.to_body(), Err(HastaError::UnknownAnalyzer(_))));

    Ok(())
}

#[test]
fn test_invalid_shingle_bounds() {
    let result = AnalyzerSpec::builder("keyword_selector")
        .filter("lowercase")
        .custom_filter(
            "my_shingle",
            json!({ "type": "shingle", "min_shingle_size": 3, "max_shingle_size": 2 }),
        )
        .build();

    assert!(matches!(result, Err(HastaError::InvalidParameter(_))));
}

#[test]
fn test_unknown_filter_kind() {
    let result = build_analyzer("a", "standard", ["nonexistent_filter"]);
    assert!(matches!(result, Err(HastaError::UnknownFilterKind(_))));

    let result = AnalyzerSpec::builder("a")
        .custom_filter("my_filter", json!({ "type": "nonexistent_filter" }))
        .build();
    assert!(matches!(result, Err(HastaError::UnknownFilterKind(_))));
}

#[test]
fn test_case_folding_preview() -> Result<()> {
    let analyzer = build_analyzer("my_lowercase_analyzer", "standard", ["lowercase"])?;
    let terms = PreviewAnalyzer::from_spec(&analyzer)
        .terms("The Quick Brown Fox Jumps Over The Lazy Dog.")?;

    assert_eq!(
        terms,
        vec!["the", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog"]
    );

    Ok(())
}

#[test]
fn test_stemming_requires_lowercase_first() -> Result<()> {
    let folded_first = build_analyzer("a", "standard", ["lowercase", "porter_stem"])?;
    let stemmed_first = build_analyzer("b", "standard", ["porter_stem", "lowercase"])?;

    let text = "Buses busses";
    assert_eq!(
        PreviewAnalyzer::from_spec(&folded_first).terms(text)?,
        vec!["buse", "buss"]
    );
    assert_eq!(
        PreviewAnalyzer::from_spec(&stemmed_first).terms(text)?,
        vec!["buses", "buss"]
    );

    Ok(())
}

#[test]
fn test_shingles_bridge_removed_stopwords_with_filler() -> Result<()> {
    let analyzer = AnalyzerSpec::builder("keyword_selector")
        .filter("lowercase")
        .filter("stop")
        .custom_filter(
            "my_shingle",
            json!({ "type": "shingle", "min_shingle_size": 2, "max_shingle_size": 2, "output_unigrams": false }),
        )
        .build()?;
    let terms = PreviewAnalyzer::from_spec(&analyzer).terms("Professor of Computer Science")?;

    assert_eq!(
        terms,
        vec!["professor _", "_ computer", "computer science"]
    );

    Ok(())
}

#[test]
fn test_custom_stopwords() -> Result<()> {
    let analyzer = AnalyzerSpec::builder("a")
        .tokenizer("whitespace")
        .custom_filter(
            "my_stop",
            json!({ "type": "stop", "stopwords": ["salton"] }),
        )
        .build()?;
    let terms = PreviewAnalyzer::from_spec(&analyzer).terms("gerard salton the")?;

    assert_eq!(terms, vec!["gerard", "the"]);

    Ok(())
}
