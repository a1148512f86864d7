//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::analysis::token::Token;
use crate::backend::{AnalyzedToken, SearchResults};
use crate::cli::args::{HastaArgs, OutputFormat};
use crate::document::Document;
use crate::error::Result;
use crate::pipeline::ScenarioReport;

/// A command result that also has a human-readable rendering.
pub trait HumanOutput: Serialize {
    /// Render the result for a terminal.
    fn to_human(&self) -> String;
}

/// Result structure for dataset sampling.
#[derive(Debug, Serialize)]
pub struct SampleResult {
    pub input: String,
    pub output: String,
    pub rows_written: usize,
}

/// Result structure for offline normalization.
#[derive(Debug, Serialize)]
pub struct NormalizeResult {
    pub content_field: String,
    pub documents: Vec<Document>,
}

/// Result structure for index settings.
#[derive(Debug, Serialize)]
pub struct SettingsResult {
    pub scenario: String,
    pub index: String,
    pub body: Value,
}

/// Result structure for local analysis.
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub scenario: String,
    pub analyzer: String,
    pub text: String,
    pub tokens: Vec<Token>,
}

/// Result structure for the remote analyze API.
#[derive(Debug, Serialize)]
pub struct AnalyzeResult {
    pub index: String,
    pub analyzer: String,
    pub tokens: Vec<AnalyzedToken>,
}

/// Result structure for a remote query.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub index: String,
    pub query: String,
    pub results: SearchResults,
}

impl HumanOutput for SampleResult {
    fn to_human(&self) -> String {
        format!(
            "Wrote {} row(s) from {} to {}",
            self.rows_written, self.input, self.output
        )
    }
}

impl HumanOutput for NormalizeResult {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for document in &self.documents {
            let _ = writeln!(out, "[{}] {}", document.id, document.content);
        }
        let _ = write!(out, "{} document(s)", self.documents.len());
        out
    }
}

impl HumanOutput for SettingsResult {
    fn to_human(&self) -> String {
        let body = serde_json::to_string_pretty(&self.body).unwrap_or_default();
        format!("PUT /{}\n{body}", self.index)
    }
}

impl HumanOutput for PreviewResult {
    fn to_human(&self) -> String {
        let mut out = format!("Analyzed tokens using '{}':\n", self.analyzer);
        for token in &self.tokens {
            let _ = writeln!(
                out,
                "{:>4}  {:<30} [{}..{}] {}",
                token.position,
                token.text,
                token.start_offset,
                token.end_offset,
                token.token_type.as_str()
            );
        }
        out.trim_end().to_string()
    }
}

impl HumanOutput for AnalyzeResult {
    fn to_human(&self) -> String {
        format_analyzed_tokens(&self.analyzer, &self.tokens)
    }
}

impl HumanOutput for SearchOutput {
    fn to_human(&self) -> String {
        format!(
            "Executing {} on '{}':\n{}",
            self.query,
            self.index,
            format_search_results(&self.results)
        )
    }
}

impl HumanOutput for ScenarioReport {
    fn to_human(&self) -> String {
        let mut out = format!("Scenario '{}' on index '{}'\n", self.scenario, self.index);
        if let Some(bulk) = &self.bulk {
            let _ = writeln!(
                out,
                "Indexed {} document(s) into index '{}'.",
                bulk.indexed, self.index
            );
        }
        if let Some(analyzer) = &self.analyzer {
            let _ = writeln!(out, "\n{}", format_analyzed_tokens(analyzer, &self.tokens));
        }
        for query in &self.queries {
            let _ = writeln!(
                out,
                "\nExecuting {} ({}):\n{}",
                query.description,
                query.query,
                format_search_results(&query.results)
            );
        }
        out.trim_end().to_string()
    }
}

fn format_analyzed_tokens(analyzer: &str, tokens: &[AnalyzedToken]) -> String {
    let terms: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
    format!("Analyzed tokens using '{analyzer}':\n{}", terms.join(" | "))
}

fn format_search_results(results: &SearchResults) -> String {
    let mut out = format!("Total hits: {}", results.total);
    for hit in &results.hits {
        let score = hit
            .score
            .map(|s| format!("{s:.3}"))
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "\nScore: {score} Content: {}",
            hit.content.as_deref().unwrap_or("No content field")
        );
    }
    out
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &HastaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &HastaArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{}", result.to_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HastaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Hit;

    #[test]
    fn test_search_output_human() {
        let output = SearchOutput {
            index: "articles".to_string(),
            query: "content:Singapore".to_string(),
            results: SearchResults {
                total: 2,
                hits: vec![
                    Hit {
                        id: "1".to_string(),
                        score: Some(1.5),
                        content: Some("Singapore tourist".to_string()),
                    },
                    Hit {
                        id: "2".to_string(),
                        score: None,
                        content: None,
                    },
                ],
            },
        };
        assert_eq!(
            output.to_human(),
            "Executing content:Singapore on 'articles':\n\
             Total hits: 2\n\
             Score: 1.500 Content: Singapore tourist\n\
             Score: - Content: No content field"
        );
    }

    #[test]
    fn test_normalize_human() {
        let result = NormalizeResult {
            content_field: "content".to_string(),
            documents: vec![Document::new(0, "x y")],
        };
        assert_eq!(result.to_human(), "[0] x y\n1 document(s)");
    }

    #[test]
    fn test_analyze_human() {
        let result = AnalyzeResult {
            index: "articles_token".to_string(),
            analyzer: "my_lowercase_analyzer".to_string(),
            tokens: vec![
                AnalyzedToken {
                    token: "the".to_string(),
                    start_offset: 0,
                    end_offset: 3,
                    token_type: "<ALPHANUM>".to_string(),
                    position: 0,
                },
                AnalyzedToken {
                    token: "quick".to_string(),
                    start_offset: 4,
                    end_offset: 9,
                    token_type: "<ALPHANUM>".to_string(),
                    position: 1,
                },
            ],
        };
        assert_eq!(
            result.to_human(),
            "Analyzed tokens using 'my_lowercase_analyzer':\nthe | quick"
        );
    }
}
