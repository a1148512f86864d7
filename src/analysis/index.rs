//! Index definitions: analyzers plus the field-to-analyzer mapping.
//!
//! An [`IndexDefinition`] is what the index-creation call receives. It pairs
//! an index name with the analyzer chains it defines and the text fields that
//! use them.
//!
//! ```
//! use hasta::analysis::analyzer::build_analyzer;
//! use hasta::analysis::index::IndexDefinition;
//!
//! let analyzer = build_analyzer("stem_analyzer", "standard", ["lowercase", "porter_stem"]).unwrap();
//! let definition = IndexDefinition::new("articles_stemming")
//!     .add_analyzer(analyzer)
//!     .map_field("content", "stem_analyzer");
//!
//! let body = definition.to_body().unwrap();
//! assert_eq!(body["mappings"]["properties"]["content"]["analyzer"], "stem_analyzer");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::analysis::analyzer::AnalyzerSpec;
use crate::analysis::filter::FilterSpec;
use crate::error::{HastaError, Result};

/// A text field and the analyzer it is indexed with.
///
/// `analyzer: None` leaves the choice to the engine's default analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub field: String,
    pub analyzer: Option<String>,
}

/// The definition of an index to create or replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    name: String,
    analyzers: Vec<AnalyzerSpec>,
    fields: Vec<FieldMapping>,
}

impl IndexDefinition {
    /// Create a definition with no analyzers and no mapped fields.
    pub fn new<S: Into<String>>(name: S) -> Self {
        IndexDefinition {
            name: name.into(),
            analyzers: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Add an analyzer chain to the index settings.
    pub fn add_analyzer(mut self, analyzer: AnalyzerSpec) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    /// Map a text field to a named analyzer.
    pub fn map_field<F: Into<String>, A: Into<String>>(mut self, field: F, analyzer: A) -> Self {
        self.fields.push(FieldMapping {
            field: field.into(),
            analyzer: Some(analyzer.into()),
        });
        self
    }

    /// Map a text field that uses the engine's default analyzer.
    pub fn text_field<F: Into<String>>(mut self, field: F) -> Self {
        self.fields.push(FieldMapping {
            field: field.into(),
            analyzer: None,
        });
        self
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The analyzer chains, in insertion order.
    pub fn analyzers(&self) -> &[AnalyzerSpec] {
        &self.analyzers
    }

    /// The field mappings, in insertion order.
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    /// Look up an analyzer by name.
    pub fn analyzer(&self, name: &str) -> Option<&AnalyzerSpec> {
        self.analyzers.iter().find(|a| a.name() == name)
    }

    /// The analyzer used by `field`, if the field maps to a defined one.
    pub fn field_analyzer(&self, field: &str) -> Option<&AnalyzerSpec> {
        self.fields
            .iter()
            .find(|m| m.field == field)
            .and_then(|m| m.analyzer.as_deref())
            .and_then(|name| self.analyzer(name))
    }

    /// Check the definition's invariants.
    ///
    /// * the index name is a single concrete Elasticsearch index name
    ///   (see [`validate_index_name`]),
    /// * analyzer and field names are unique,
    /// * custom filters sharing a name across analyzers agree on parameters,
    /// * every analyzer a field refers to is defined here
    ///   ([`HastaError::UnknownAnalyzer`] otherwise).
    pub fn validate(&self) -> Result<()> {
        validate_index_name(&self.name)?;

        for (i, analyzer) in self.analyzers.iter().enumerate() {
            if self.analyzers[..i].iter().any(|a| a.name() == analyzer.name()) {
                return Err(HastaError::invalid_parameter(format!(
                    "analyzer '{}' is defined twice in index '{}'",
                    analyzer.name(),
                    self.name
                )));
            }
        }

        self.collect_custom_filters()?;

        for (i, mapping) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|m| m.field == mapping.field) {
                return Err(HastaError::invalid_parameter(format!(
                    "field '{}' is mapped twice in index '{}'",
                    mapping.field, self.name
                )));
            }
            if let Some(analyzer) = &mapping.analyzer
                && self.analyzer(analyzer).is_none()
            {
                return Err(HastaError::unknown_analyzer(format!(
                    "field '{}' of index '{}' refers to undefined analyzer '{analyzer}'",
                    mapping.field, self.name
                )));
            }
        }

        Ok(())
    }

    fn collect_custom_filters(&self) -> Result<Vec<&FilterSpec>> {
        let mut filters: Vec<&FilterSpec> = Vec::new();
        for filter in self.analyzers.iter().flat_map(|a| a.custom_filters()) {
            match filters.iter().find(|f| f.name() == filter.name()) {
                Some(existing) if *existing != filter => {
                    return Err(HastaError::invalid_parameter(format!(
                        "filter '{}' has conflicting definitions in index '{}'",
                        filter.name(),
                        self.name
                    )));
                }
                Some(_) => {}
                None => filters.push(filter),
            }
        }
        Ok(filters)
    }

    /// Render the index-creation body (`settings` and `mappings`).
    ///
    /// Sections with nothing in them are left out, so a definition with no
    /// analyzers and no fields renders as `{}`.
    pub fn to_body(&self) -> Result<Value> {
        self.validate()?;

        let mut body = Map::new();

        if !self.analyzers.is_empty() {
            let analyzers: Map<String, Value> = self
                .analyzers
                .iter()
                .map(|a| (a.name().to_string(), a.to_json()))
                .collect();

            let filters: Map<String, Value> = self
                .collect_custom_filters()?
                .into_iter()
                .filter_map(|f| f.definition_json().map(|d| (f.name().to_string(), d)))
                .collect();

            let mut analysis = Map::new();
            analysis.insert("analyzer".to_string(), Value::Object(analyzers));
            if !filters.is_empty() {
                analysis.insert("filter".to_string(), Value::Object(filters));
            }
            body.insert("settings".to_string(), json!({ "analysis": analysis }));
        }

        if !self.fields.is_empty() {
            let properties: Map<String, Value> = self
                .fields
                .iter()
                .map(|m| {
                    let property = match &m.analyzer {
                        Some(analyzer) => json!({ "type": "text", "analyzer": analyzer }),
                        None => json!({ "type": "text" }),
                    };
                    (m.field.clone(), property)
                })
                .collect();
            body.insert(
                "mappings".to_string(),
                json!({ "properties": properties }),
            );
        }

        Ok(Value::Object(body))
    }
}

/// Characters Elasticsearch refuses in index names.
const FORBIDDEN_NAME_CHARS: [char; 11] = ['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', ':'];

/// Maximum index name length in bytes.
const MAX_NAME_BYTES: usize = 255;

/// Check that `name` addresses exactly one concrete index.
///
/// The name ends up unescaped in request paths such as `DELETE /{name}`, so
/// wildcards, comma lists, `_all` and path separators are rejected.
pub fn validate_index_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| -> Result<()> {
        Err(HastaError::invalid_parameter(format!(
            "index name '{name}' {reason}"
        )))
    };

    if name.is_empty() {
        return Err(HastaError::invalid_parameter("index name is empty"));
    }
    if name == "." || name == ".." {
        return invalid("is reserved");
    }
    if name.starts_with(['_', '-', '+']) {
        return invalid("must not start with '_', '-' or '+'");
    }
    if name.len() > MAX_NAME_BYTES {
        return invalid("is longer than 255 bytes");
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return invalid("must be lowercase");
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_NAME_CHARS.contains(c))
    {
        return invalid(&format!("contains forbidden character {c:?}"));
    }
    Ok(())
}
