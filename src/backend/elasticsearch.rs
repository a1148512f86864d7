//! Elasticsearch backend over its REST API.
//!
//! Requests use basic authentication when a password is configured.
//! Certificate verification can be switched off for local clusters with
//! self-signed certificates (`verify_certs: false`).

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::analysis::index::{IndexDefinition, validate_index_name};
use crate::backend::config::BackendConfig;
use crate::backend::{AnalyzedToken, BulkFailure, BulkReport, Hit, SearchBackend, SearchResults};
use crate::document::Document;
use crate::error::{HastaError, Result};
use crate::query::Query;

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    items: Vec<BulkItem>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    index: BulkItemResult,
}

#[derive(Debug, Deserialize)]
struct BulkItemResult {
    status: u16,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    tokens: Vec<AnalyzedToken>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    total: Option<Value>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Option<Value>,
}

/// A [`SearchBackend`] talking to an Elasticsearch cluster.
pub struct ElasticsearchBackend {
    client: Client,
    config: BackendConfig,
}

impl ElasticsearchBackend {
    /// Create a backend for the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self> {
        config.validate()?;
        if !config.verify_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.base_url()
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()?;

        Ok(ElasticsearchBackend { client, config })
    }

    /// The configuration this backend was created with.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'));
        debug!("{method} {url}");
        let builder = self.client.request(method, url);
        match &self.config.password {
            Some(password) => builder.basic_auth(&self.config.username, Some(password)),
            None => builder,
        }
    }

    /// Send a request and return the parsed body of a successful response.
    async fn send(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(HastaError::backend(status.as_u16(), text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self.request(Method::HEAD, index).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(HastaError::backend(
                status.as_u16(),
                format!("cannot check whether index '{index}' exists"),
            )),
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    async fn ping(&self) -> Result<()> {
        let root = self.send(self.request(Method::GET, "/")).await?;
        info!(
            "Connected to {} (version {})",
            self.config.base_url(),
            root.pointer("/version/number")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
        );
        Ok(())
    }

    async fn replace_index(&self, index: &IndexDefinition) -> Result<()> {
        index.validate()?;
        let body = index.to_body()?;

        if self.index_exists(index.name()).await? {
            info!("Deleting existing index '{}'", index.name());
            self.send(self.request(Method::DELETE, index.name())).await?;
        }

        info!("Creating index '{}'", index.name());
        debug!("Index body: {body}");
        self.send(self.request(Method::PUT, index.name()).json(&body))
            .await?;
        Ok(())
    }

    async fn bulk_index(&self, index: &str, documents: &[Document]) -> Result<BulkReport> {
        validate_index_name(index)?;
        if documents.is_empty() {
            return Ok(BulkReport::default());
        }

        let body = bulk_body(index, documents)?;
        let response = self
            .send(
                self.request(Method::POST, "_bulk?refresh=wait_for")
                    .header("Content-Type", "application/x-ndjson")
                    .body(body),
            )
            .await?;

        let report = parse_bulk_response(response, documents)?;
        info!(
            "Indexed {} document(s) into '{index}', {} failed",
            report.indexed,
            report.failures.len()
        );
        for failure in &report.failures {
            warn!(
                "Document {} rejected (status {}): {}",
                failure.id, failure.status, failure.reason
            );
        }
        Ok(report)
    }

    async fn analyze(&self, index: &str, analyzer: &str, text: &str) -> Result<Vec<AnalyzedToken>> {
        validate_index_name(index)?;
        let body = json!({ "analyzer": analyzer, "text": text });
        let response = self
            .send(
                self.request(Method::POST, &format!("{index}/_analyze"))
                    .json(&body),
            )
            .await?;
        let parsed: AnalyzeResponse = serde_json::from_value(response)?;
        Ok(parsed.tokens)
    }

    async fn search(&self, index: &str, query: &Query) -> Result<SearchResults> {
        validate_index_name(index)?;
        let body = json!({ "query": query.to_json() });
        debug!("Search body: {body}");
        let response = self
            .send(
                self.request(Method::POST, &format!("{index}/_search"))
                    .json(&body),
            )
            .await?;
        parse_search_response(response)
    }
}

/// Render documents as an NDJSON `_bulk` body.
pub fn bulk_body(index: &str, documents: &[Document]) -> Result<String> {
    let mut body = String::new();
    for document in documents {
        let action = json!({ "index": { "_index": index, "_id": document.id.to_string() } });
        body.push_str(&serde_json::to_string(&action)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(&document.source())?);
        body.push('\n');
    }
    Ok(body)
}

/// Match bulk response items to the documents sent, in request order.
fn parse_bulk_response(response: Value, documents: &[Document]) -> Result<BulkReport> {
    let parsed: BulkResponse = serde_json::from_value(response)?;
    if parsed.items.len() != documents.len() {
        return Err(HastaError::other(format!(
            "bulk response has {} item(s) for {} document(s)",
            parsed.items.len(),
            documents.len()
        )));
    }

    let mut report = BulkReport::default();
    for (item, document) in parsed.items.into_iter().zip(documents) {
        let result = item.index;
        match result.error {
            None if result.status < 300 => report.indexed += 1,
            error => report.failures.push(BulkFailure {
                id: document.id,
                status: result.status,
                reason: error
                    .as_ref()
                    .and_then(|e| e.get("reason").and_then(Value::as_str))
                    .unwrap_or("unknown error")
                    .to_string(),
            }),
        }
    }
    Ok(report)
}

fn parse_search_response(response: Value) -> Result<SearchResults> {
    let parsed: SearchResponse = serde_json::from_value(response)?;

    // `total` is an object in 7.x+ and a bare number before that.
    let total = match &parsed.hits.total {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(total) => total.get("value").and_then(Value::as_u64).unwrap_or_default(),
        None => parsed.hits.hits.len() as u64,
    };

    let hits = parsed
        .hits
        .hits
        .into_iter()
        .map(|hit| Hit {
            id: hit.id,
            score: hit.score,
            content: hit
                .source
                .as_ref()
                .and_then(|s| s.get("content"))
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect();

    Ok(SearchResults { total, hits })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_body() {
        let documents = vec![
            Document::new(0, "Singapore tourist 5"),
            Document::new(1, "Jakarta"),
        ];
        let body = bulk_body("articles", &documents).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(body.ends_with('\n'));
        assert_eq!(
            serde_json::from_str::<Value>(lines[0]).unwrap(),
            json!({ "index": { "_index": "articles", "_id": "0" } })
        );
        assert_eq!(
            serde_json::from_str::<Value>(lines[1]).unwrap(),
            json!({ "content": "Singapore tourist 5" })
        );
        assert_eq!(
            serde_json::from_str::<Value>(lines[2]).unwrap(),
            json!({ "index": { "_index": "articles", "_id": "1" } })
        );
    }

    #[test]
    fn test_parse_bulk_response_with_failure() {
        let documents = vec![Document::new(10, "a"), Document::new(11, "b")];
        let response = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "10", "status": 201 } },
                { "index": {
                    "_id": "11",
                    "status": 400,
                    "error": { "type": "mapper_parsing_exception", "reason": "failed to parse" }
                } }
            ]
        });

        let report = parse_bulk_response(response, &documents).unwrap();
        assert_eq!(report.indexed, 1);
        assert_eq!(
            report.failures,
            vec![BulkFailure {
                id: 11,
                status: 400,
                reason: "failed to parse".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_bulk_response_item_mismatch() {
        let documents = vec![Document::new(0, "a")];
        let response = json!({ "errors": false, "items": [] });
        assert!(parse_bulk_response(response, &documents).is_err());
    }

    #[test]
    fn test_parse_search_response() {
        let response = json!({
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    { "_id": "7", "_score": 3.5, "_source": { "content": "Singapore tourist" } }
                ]
            }
        });

        let results = parse_search_response(response).unwrap();
        assert_eq!(results.total, 42);
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hits[0].id, "7");
        assert_eq!(results.hits[0].score, Some(3.5));
        assert_eq!(
            results.hits[0].content.as_deref(),
            Some("Singapore tourist")
        );
    }

    #[test]
    fn test_parse_search_response_legacy_total() {
        let response = json!({ "hits": { "total": 3, "hits": [] } });
        assert_eq!(parse_search_response(response).unwrap().total, 3);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = BackendConfig::default().with_url("ftp://localhost");
        assert!(ElasticsearchBackend::new(config).is_err());
    }

    #[tokio::test]
    async fn test_multi_index_targets_fail_before_any_request() {
        // Nothing listens on port 9; a request would surface as an HTTP error.
        let config = BackendConfig::default().with_url("http://127.0.0.1:9");
        let backend = ElasticsearchBackend::new(config).unwrap();

        for name in ["*", "_all", "a,b"] {
            let result = backend.replace_index(&IndexDefinition::new(name)).await;
            assert!(matches!(result, Err(HastaError::InvalidParameter(_))));

            let result = backend
                .bulk_index(name, &[Document::new(0, "Jakarta")])
                .await;
            assert!(matches!(result, Err(HastaError::InvalidParameter(_))));
        }
    }
}
