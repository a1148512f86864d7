//! Command implementations for the hasta CLI.

use log::{debug, info};

use crate::backend::{ElasticsearchBackend, SearchBackend};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::converter::RowReader;
use crate::document::converter::csv::{CsvRowReader, sample_csv};
use crate::document::{DEFAULT_CONTENT_FIELD, DocumentNormalizer, Row};
use crate::error::{HastaError, Result};
use crate::pipeline::run_scenario;
use crate::query::Query;
use crate::scenario::Scenario;

/// Execute a CLI command.
pub async fn execute_command(args: HastaArgs) -> Result<()> {
    match &args.command {
        Command::Sample(sample_args) => sample(sample_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize(normalize_args.clone(), &args),
        Command::Settings(settings_args) => settings(settings_args.clone(), &args),
        Command::Preview(preview_args) => preview(preview_args.clone(), &args),
        Command::Run(run_args) => run(run_args.clone(), &args).await,
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args).await,
        Command::Search(search_args) => search(search_args.clone(), &args).await,
    }
}

/// Copy the first rows of a dataset.
fn sample(args: SampleArgs, cli_args: &HastaArgs) -> Result<()> {
    let rows_written = sample_csv(&args.input, &args.output, args.limit)?;

    output_result(
        "Dataset sampled",
        &SampleResult {
            input: args.input.display().to_string(),
            output: args.output.display().to_string(),
            rows_written,
        },
        cli_args,
    )
}

/// Normalize CSV rows into documents offline.
fn normalize(args: NormalizeArgs, cli_args: &HastaArgs) -> Result<()> {
    let rows = read_rows(&args.csv, args.limit, &args.content_field)?;
    let normalizer = DocumentNormalizer::new().with_reserved_field(args.content_field.clone());
    let documents = normalizer.normalize_rows(&rows)?;

    output_result(
        "Documents normalized",
        &NormalizeResult {
            content_field: args.content_field,
            documents,
        },
        cli_args,
    )
}

/// Print a scenario's index-creation body.
fn settings(args: SettingsArgs, cli_args: &HastaArgs) -> Result<()> {
    let scenario = Scenario::by_name(&args.scenario)?;
    let body = scenario.index.to_body()?;

    output_result(
        "Index settings",
        &SettingsResult {
            scenario: scenario.name.clone(),
            index: scenario.index.name().to_string(),
            body,
        },
        cli_args,
    )
}

/// Analyze text locally with a scenario's analyzer.
fn preview(args: PreviewArgs, cli_args: &HastaArgs) -> Result<()> {
    let scenario = Scenario::by_name(&args.scenario)?;
    let analyzer = scenario.preview_analyzer()?;
    let text = args
        .text
        .or_else(|| scenario.sample_text.clone())
        .ok_or_else(|| {
            HastaError::config(format!(
                "scenario '{}' has no sample text, pass --text",
                scenario.name
            ))
        })?;
    let tokens = analyzer.tokens(&text)?;

    output_result(
        "Local analysis",
        &PreviewResult {
            scenario: scenario.name.clone(),
            analyzer: analyzer.name().to_string(),
            text,
            tokens,
        },
        cli_args,
    )
}

/// Run a scenario against the engine.
async fn run(args: RunArgs, cli_args: &HastaArgs) -> Result<()> {
    let scenario = Scenario::by_name(&args.scenario)?;
    let rows = match &args.data {
        Some(path) => Some(read_rows(path, Some(args.limit), DEFAULT_CONTENT_FIELD)?),
        None if scenario.uses_dataset => {
            return Err(HastaError::config(format!(
                "scenario '{}' indexes a dataset, pass --data",
                scenario.name
            )));
        }
        None => None,
    };

    let backend = connect(&args.connection).await?;
    let report = run_scenario(&backend, &scenario, rows.as_deref()).await?;

    output_result("Scenario completed", &report, cli_args)
}

/// Analyze text with the engine.
async fn analyze(args: AnalyzeArgs, cli_args: &HastaArgs) -> Result<()> {
    let backend = connect(&args.connection).await?;
    let tokens = backend
        .analyze(&args.index, &args.analyzer, &args.text)
        .await?;

    output_result(
        "Remote analysis",
        &AnalyzeResult {
            index: args.index,
            analyzer: args.analyzer,
            tokens,
        },
        cli_args,
    )
}

/// Query an index.
async fn search(args: SearchArgs, cli_args: &HastaArgs) -> Result<()> {
    let query = build_query(&args.field, &args.query, args.mode);
    debug!("Query: {}", query.to_json());

    let backend = connect(&args.connection).await?;
    let results = backend.search(&args.index, &query).await?;

    output_result(
        "Search completed",
        &SearchOutput {
            index: args.index,
            query: query.to_string(),
            results,
        },
        cli_args,
    )
}

/// Translate the search command's text and mode into a query.
pub fn build_query(field: &str, text: &str, mode: SearchMode) -> Query {
    match mode {
        SearchMode::Match => Query::matching(field, text),
        SearchMode::Phrase => Query::phrase(field, text),
        SearchMode::All => Query::all_of(field, text.split_whitespace()),
    }
}

fn read_rows(
    path: &std::path::Path,
    limit: Option<usize>,
    content_field: &str,
) -> Result<Vec<Row>> {
    let reader = CsvRowReader::new().with_reserved_field(content_field);
    let reader = match limit {
        Some(limit) => reader.with_limit(limit),
        None => reader,
    };
    let rows = reader.read(path)?.collect::<Result<Vec<_>>>()?;
    info!("Read {} row(s) from {}", rows.len(), path.display());
    Ok(rows)
}

async fn connect(connection: &ConnectionArgs) -> Result<ElasticsearchBackend> {
    let backend = ElasticsearchBackend::new(connection.to_config()?)?;
    backend.ping().await?;
    Ok(backend)
}
