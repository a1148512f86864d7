//! Command line argument parsing for the hasta CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::backend::BackendConfig;
use crate::document::DEFAULT_CONTENT_FIELD;
use crate::error::Result;

/// hasta - analyzer chains and document preparation for Elasticsearch
#[derive(Parser, Debug, Clone)]
#[command(name = "hasta")]
#[command(about = "Configure analyzer chains and index tabular data into Elasticsearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HastaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HastaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Copy the first rows of a CSV file into a new file
    Sample(SampleArgs),

    /// Turn CSV rows into documents without contacting the engine
    Normalize(NormalizeArgs),

    /// Print the index-creation body of a scenario
    Settings(SettingsArgs),

    /// Run a scenario's analyzer locally
    Preview(PreviewArgs),

    /// Run a scenario against the engine
    Run(RunArgs),

    /// Analyze text with an analyzer of an existing index
    Analyze(AnalyzeArgs),

    /// Query an existing index
    Search(SearchArgs),
}

/// Arguments for sampling a dataset
#[derive(Parser, Debug, Clone)]
pub struct SampleArgs {
    /// Source CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination CSV file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Number of rows to keep
    #[arg(short, long, default_value = "1000")]
    pub limit: usize,
}

/// Arguments for offline normalization
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// CSV file with a header row
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Only read the first N rows
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Column used verbatim as the document content when present
    #[arg(long, default_value = DEFAULT_CONTENT_FIELD)]
    pub content_field: String,
}

/// Arguments for printing index settings
#[derive(Parser, Debug, Clone)]
pub struct SettingsArgs {
    /// Scenario name (basic, token, stemming, keywords, pipeline)
    #[arg(value_name = "SCENARIO")]
    pub scenario: String,
}

/// Arguments for local analysis
#[derive(Parser, Debug, Clone)]
pub struct PreviewArgs {
    /// Scenario name (basic, token, stemming, keywords, pipeline)
    #[arg(value_name = "SCENARIO")]
    pub scenario: String,

    /// Text to analyze instead of the scenario's sample text
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Arguments for running a scenario
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Scenario name (basic, token, stemming, keywords, pipeline)
    #[arg(value_name = "SCENARIO")]
    pub scenario: String,

    /// CSV dataset to index
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Only index the first N rows
    #[arg(short, long, default_value = "1000")]
    pub limit: usize,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Arguments for the remote analyze API
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Index defining the analyzer
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Analyzer name
    #[arg(value_name = "ANALYZER")]
    pub analyzer: String,

    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index to query
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Query text
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// How the query text is matched
    #[arg(short, long, default_value = "match")]
    pub mode: SearchMode,

    /// Field to search in
    #[arg(long, default_value = DEFAULT_CONTENT_FIELD)]
    pub field: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Engine connection options shared by the remote commands
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// JSON file with connection settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Engine URL
    #[arg(long, env = "HASTA_URL")]
    pub url: Option<String>,

    /// Basic auth user
    #[arg(long, env = "HASTA_USERNAME")]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "HASTA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Resolve the backend configuration: file (or defaults), then flags.
    pub fn to_config(&self) -> Result<BackendConfig> {
        let mut config = match &self.config {
            Some(path) => BackendConfig::from_file(path)?,
            None => BackendConfig::default(),
        };
        if let Some(url) = &self.url {
            config = config.with_url(url.clone());
        }
        if let Some(username) = &self.username {
            config = config.with_username(username.clone());
        }
        if let Some(password) = &self.password {
            config = config.with_password(password.clone());
        }
        if self.insecure {
            config = config.with_verify_certs(false);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Query modes for the search command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Any analyzed term may match
    Match,
    /// Terms must appear together in order
    Phrase,
    /// Every whitespace-separated term must match
    All,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity() {
        let args = HastaArgs::parse_from(["hasta", "settings", "token"]);
        assert_eq!(args.verbosity(), 1);

        let args = HastaArgs::parse_from(["hasta", "-vv", "settings", "token"]);
        assert_eq!(args.verbosity(), 2);

        let args = HastaArgs::parse_from(["hasta", "-q", "-vvv", "settings", "token"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_search_args() {
        let args = HastaArgs::parse_from([
            "hasta",
            "--format",
            "json",
            "search",
            "articles",
            "Indonesian tourist",
            "--mode",
            "phrase",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Search(search) => {
                assert_eq!(search.index, "articles");
                assert_eq!(search.mode, SearchMode::Phrase);
                assert_eq!(search.field, "content");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_connection_overrides() {
        let connection = ConnectionArgs {
            url: Some("http://localhost:9201".to_string()),
            password: Some("secret".to_string()),
            insecure: true,
            ..ConnectionArgs::default()
        };
        let config = connection.to_config().unwrap();
        assert_eq!(config.url, "http://localhost:9201");
        assert_eq!(config.username, "elastic");
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert!(!config.verify_certs);
    }

    #[test]
    fn test_run_defaults() {
        let args = HastaArgs::parse_from(["hasta", "run", "pipeline", "--data", "sample.csv"]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.scenario, "pipeline");
                assert_eq!(run.limit, 1000);
                assert_eq!(run.data, Some(PathBuf::from("sample.csv")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
