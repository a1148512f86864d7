//! End-to-end scenario runs against a search backend.
//!
//! [`run_scenario`] performs the steps of a scenario in order:
//!
//! 1. replace the index (delete if it exists, then create),
//! 2. normalize and bulk-index the dataset rows, if any,
//! 3. analyze the sample text with the scenario's analyzer,
//! 4. execute the scenario's queries.
//!
//! Calls are issued one after another; each step needs the previous one to
//! have completed on the engine.

use log::info;
use serde::Serialize;

use crate::backend::{AnalyzedToken, BulkReport, SearchBackend, SearchResults};
use crate::document::{DocumentNormalizer, Row};
use crate::error::Result;
use crate::scenario::Scenario;

/// The outcome of one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub description: String,
    pub query: String,
    pub results: SearchResults,
}

/// Everything a scenario run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub index: String,
    /// Bulk outcome, when rows were indexed.
    pub bulk: Option<BulkReport>,
    /// Analyzer used for the sample text, if any.
    pub analyzer: Option<String>,
    pub tokens: Vec<AnalyzedToken>,
    pub queries: Vec<QueryReport>,
}

/// Run a scenario using the default normalizer.
///
/// A bulk request with rejected documents fails the run with
/// [`HastaError::BulkIndex`](crate::error::HastaError::BulkIndex), carrying
/// the ids (row positions) of the rejected documents.
pub async fn run_scenario(
    backend: &dyn SearchBackend,
    scenario: &Scenario,
    rows: Option<&[Row]>,
) -> Result<ScenarioReport> {
    run_scenario_with(backend, scenario, rows, &DocumentNormalizer::default()).await
}

/// Run a scenario, normalizing rows with `normalizer`.
pub async fn run_scenario_with(
    backend: &dyn SearchBackend,
    scenario: &Scenario,
    rows: Option<&[Row]>,
    normalizer: &DocumentNormalizer,
) -> Result<ScenarioReport> {
    let index = scenario.index.name();
    info!("Running scenario '{}' on index '{index}'", scenario.name);

    // Normalize before touching the engine so a bad row leaves it untouched.
    let documents = rows.map(|rows| normalizer.normalize_rows(rows)).transpose()?;

    backend.replace_index(&scenario.index).await?;

    let bulk = match documents {
        Some(documents) => Some(backend.bulk_index(index, &documents).await?.into_result()?),
        None => None,
    };

    let tokens = match (&scenario.analyzer, &scenario.sample_text) {
        (Some(analyzer), Some(text)) => backend.analyze(index, analyzer, text).await?,
        _ => Vec::new(),
    };

    let mut queries = Vec::with_capacity(scenario.queries.len());
    for named in &scenario.queries {
        let results = backend.search(index, &named.query).await?;
        info!("{}: {} hit(s)", named.description, results.total);
        queries.push(QueryReport {
            description: named.description.clone(),
            query: named.query.to_string(),
            results,
        });
    }

    Ok(ScenarioReport {
        scenario: scenario.name.clone(),
        index: index.to_string(),
        bulk,
        analyzer: scenario.analyzer.clone(),
        tokens,
        queries,
    })
}
