//! Token filter configuration.
//!
//! A filter in an analyzer chain is either a built-in referenced by its
//! identifier (`"lowercase"`, `"stop"`, `"porter_stem"`, `"stemmer"`,
//! `"shingle"`) or a custom, parameterized filter with its own name whose
//! `type` is one of those identifiers:
//!
//! ```
//! use hasta::analysis::filter::{FilterDefinition, FilterKind, FilterSpec};
//! use serde_json::json;
//!
//! let builtin = FilterSpec::from_definition(&"lowercase".into()).unwrap();
//! assert_eq!(builtin.kind(), FilterKind::Lowercase);
//!
//! let custom = FilterDefinition::with_params(
//!     "my_shingle",
//!     json!({ "type": "shingle", "min_shingle_size": 2, "max_shingle_size": 3 }),
//! );
//! let spec = FilterSpec::from_definition(&custom).unwrap();
//! assert_eq!(spec.kind(), FilterKind::Shingle);
//! assert_eq!(spec.name(), "my_shingle");
//! ```
//!
//! Only the four kinds in [`FilterKind`] are recognized. Anything else is
//! rejected with [`HastaError::UnknownFilterKind`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{HastaError, Result};

/// The closed set of filter kinds an analyzer chain may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Case folding.
    Lowercase,
    /// Stopword removal.
    Stop,
    /// Stemming.
    Stemmer,
    /// Shingling (token n-grams).
    Shingle,
}

impl FilterKind {
    /// Resolve a filter identifier to its kind.
    ///
    /// `porter_stem` and `stemmer` both resolve to [`FilterKind::Stemmer`].
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        match identifier {
            "lowercase" => Ok(FilterKind::Lowercase),
            "stop" => Ok(FilterKind::Stop),
            "porter_stem" | "stemmer" => Ok(FilterKind::Stemmer),
            "shingle" => Ok(FilterKind::Shingle),
            other => Err(HastaError::unknown_filter_kind(format!(
                "'{other}' is not one of lowercase, stop, porter_stem, stemmer, shingle"
            ))),
        }
    }

    /// Human-readable description of what the filter does.
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::Lowercase => "case folding",
            FilterKind::Stop => "stopword removal",
            FilterKind::Stemmer => "stemming",
            FilterKind::Shingle => "shingling",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A filter as written by the caller: an identifier plus optional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDefinition {
    name: String,
    params: Option<Value>,
}

impl FilterDefinition {
    /// Reference a built-in filter by identifier.
    pub fn named<S: Into<String>>(name: S) -> Self {
        FilterDefinition {
            name: name.into(),
            params: None,
        }
    }

    /// Define a custom filter called `name` from a parameter object.
    ///
    /// The object is only checked when the definition is validated.
    pub fn with_params<S: Into<String>>(name: S, params: Value) -> Self {
        FilterDefinition {
            name: name.into(),
            params: Some(params),
        }
    }

    /// The identifier or custom name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw parameters, if any.
    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }
}

impl From<&str> for FilterDefinition {
    fn from(name: &str) -> Self {
        FilterDefinition::named(name)
    }
}

impl From<String> for FilterDefinition {
    fn from(name: String) -> Self {
        FilterDefinition::named(name)
    }
}

/// Which stopword list a stop filter uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopWords {
    /// The predefined English list (`_english_`).
    English,
    /// No stopwords at all (`_none_`).
    None,
    /// An explicit word list.
    Custom(Vec<String>),
}

impl StopWords {
    fn to_json(&self) -> Value {
        match self {
            StopWords::English => json!("_english_"),
            StopWords::None => json!("_none_"),
            StopWords::Custom(words) => json!(words),
        }
    }
}

/// Parameters of a shingle filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShingleParams {
    pub min_shingle_size: usize,
    pub max_shingle_size: usize,
    pub output_unigrams: bool,
    pub token_separator: String,
    pub filler_token: String,
}

impl Default for ShingleParams {
    fn default() -> Self {
        ShingleParams {
            min_shingle_size: 2,
            max_shingle_size: 2,
            output_unigrams: true,
            token_separator: " ".to_string(),
            filler_token: "_".to_string(),
        }
    }
}

impl ShingleParams {
    /// Check the size bounds.
    pub fn validate(&self) -> Result<()> {
        if self.min_shingle_size < 2 {
            return Err(HastaError::invalid_parameter(format!(
                "min_shingle_size must be at least 2, got {}",
                self.min_shingle_size
            )));
        }
        if self.min_shingle_size > self.max_shingle_size {
            return Err(HastaError::invalid_parameter(format!(
                "min_shingle_size ({}) must not be greater than max_shingle_size ({})",
                self.min_shingle_size, self.max_shingle_size
            )));
        }
        Ok(())
    }
}

/// Typed parameters of a custom filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterParams {
    Lowercase,
    Stop { stopwords: StopWords },
    PorterStem,
    Stemmer { language: String },
    Shingle(ShingleParams),
}

/// A validated filter in an analyzer chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    name: String,
    kind: FilterKind,
    params: Option<FilterParams>,
}

impl FilterSpec {
    /// Validate a caller-supplied definition.
    pub fn from_definition(definition: &FilterDefinition) -> Result<Self> {
        let Some(raw) = definition.params() else {
            let kind = FilterKind::from_identifier(definition.name())?;
            return Ok(FilterSpec {
                name: definition.name().to_string(),
                kind,
                params: None,
            });
        };

        let Value::Object(raw) = raw else {
            return Err(HastaError::invalid_parameter(format!(
                "parameters of filter '{}' must be an object, got {raw}",
                definition.name()
            )));
        };

        let mut params = raw.clone();
        let type_name = match params.remove("type") {
            Some(Value::String(t)) => t,
            Some(other) => {
                return Err(HastaError::invalid_parameter(format!(
                    "'type' of filter '{}' must be a string, got {other}",
                    definition.name()
                )));
            }
            None => definition.name().to_string(),
        };
        let kind = FilterKind::from_identifier(&type_name)?;
        let mut reader = ParamReader::new(definition.name(), params);

        let typed = match (kind, type_name.as_str()) {
            (FilterKind::Lowercase, _) => FilterParams::Lowercase,
            (FilterKind::Stop, _) => FilterParams::Stop {
                stopwords: reader.take_stopwords("stopwords")?.unwrap_or(StopWords::English),
            },
            (FilterKind::Stemmer, "porter_stem") => FilterParams::PorterStem,
            (FilterKind::Stemmer, _) => {
                let language = reader
                    .take_string(&["language", "name"])?
                    .unwrap_or_else(|| "english".to_string());
                if !matches!(language.as_str(), "english" | "porter") {
                    return Err(HastaError::invalid_parameter(format!(
                        "stemmer '{}' does not support language '{language}'",
                        definition.name()
                    )));
                }
                FilterParams::Stemmer { language }
            }
            (FilterKind::Shingle, _) => {
                let defaults = ShingleParams::default();
                let shingle = ShingleParams {
                    min_shingle_size: reader
                        .take_usize(&["min_shingle_size", "min"])?
                        .unwrap_or(defaults.min_shingle_size),
                    max_shingle_size: reader
                        .take_usize(&["max_shingle_size", "max"])?
                        .unwrap_or(defaults.max_shingle_size),
                    output_unigrams: reader
                        .take_bool(&["output_unigrams", "outputUnigrams"])?
                        .unwrap_or(defaults.output_unigrams),
                    token_separator: reader
                        .take_string(&["token_separator"])?
                        .unwrap_or(defaults.token_separator),
                    filler_token: reader
                        .take_string(&["filler_token"])?
                        .unwrap_or(defaults.filler_token),
                };
                shingle.validate()?;
                FilterParams::Shingle(shingle)
            }
        };
        reader.finish()?;

        Ok(FilterSpec {
            name: definition.name().to_string(),
            kind,
            params: Some(typed),
        })
    }

    /// Name the filter is referenced by inside the analyzer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The filter kind.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Typed parameters, for custom filters.
    pub fn params(&self) -> Option<&FilterParams> {
        self.params.as_ref()
    }

    /// Whether this filter needs its own definition in the index settings.
    pub fn is_custom(&self) -> bool {
        self.params.is_some()
    }

    /// Shingle parameters, defaults for a bare `shingle` reference.
    pub fn shingle_params(&self) -> Option<ShingleParams> {
        match (&self.params, self.kind) {
            (Some(FilterParams::Shingle(params)), _) => Some(params.clone()),
            (None, FilterKind::Shingle) => Some(ShingleParams::default()),
            _ => None,
        }
    }

    /// Stopword list, the English list for a bare `stop` reference.
    pub fn stopwords(&self) -> Option<StopWords> {
        match (&self.params, self.kind) {
            (Some(FilterParams::Stop { stopwords }), _) => Some(stopwords.clone()),
            (None, FilterKind::Stop) => Some(StopWords::English),
            _ => None,
        }
    }

    /// The filter definition object for `settings.analysis.filter`.
    ///
    /// Returns `None` for built-in references, which need no definition.
    pub fn definition_json(&self) -> Option<Value> {
        let value = match self.params.as_ref()? {
            FilterParams::Lowercase => json!({ "type": "lowercase" }),
            FilterParams::Stop { stopwords } => json!({
                "type": "stop",
                "stopwords": stopwords.to_json(),
            }),
            FilterParams::PorterStem => json!({ "type": "porter_stem" }),
            FilterParams::Stemmer { language } => json!({
                "type": "stemmer",
                "language": language,
            }),
            FilterParams::Shingle(params) => json!({
                "type": "shingle",
                "min_shingle_size": params.min_shingle_size,
                "max_shingle_size": params.max_shingle_size,
                "output_unigrams": params.output_unigrams,
                "token_separator": params.token_separator,
                "filler_token": params.filler_token,
            }),
        };
        Some(value)
    }
}

/// Pulls typed values out of a parameter object and tracks leftovers.
struct ParamReader<'a> {
    filter: &'a str,
    params: Map<String, Value>,
}

impl<'a> ParamReader<'a> {
    fn new(filter: &'a str, params: Map<String, Value>) -> Self {
        ParamReader { filter, params }
    }

    fn take(&mut self, keys: &[&str]) -> Result<Option<(String, Value)>> {
        let mut found = None;
        for key in keys {
            if let Some(value) = self.params.remove(*key) {
                if found.is_some() {
                    return Err(HastaError::invalid_parameter(format!(
                        "filter '{}' sets '{}' more than once",
                        self.filter, keys[0]
                    )));
                }
                found = Some((key.to_string(), value));
            }
        }
        Ok(found)
    }

    fn invalid(&self, key: &str, expected: &str, value: &Value) -> HastaError {
        HastaError::invalid_parameter(format!(
            "'{key}' of filter '{}' must be {expected}, got {value}",
            self.filter
        ))
    }

    fn take_usize(&mut self, keys: &[&str]) -> Result<Option<usize>> {
        match self.take(keys)? {
            None => Ok(None),
            Some((key, value)) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(&key, "a non-negative integer", &value)),
        }
    }

    fn take_bool(&mut self, keys: &[&str]) -> Result<Option<bool>> {
        match self.take(keys)? {
            None => Ok(None),
            Some((key, value)) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid(&key, "a boolean", &value)),
        }
    }

    fn take_string(&mut self, keys: &[&str]) -> Result<Option<String>> {
        match self.take(keys)? {
            None => Ok(None),
            Some((key, value)) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.invalid(&key, "a string", &value)),
        }
    }

    fn take_stopwords(&mut self, key: &str) -> Result<Option<StopWords>> {
        let Some((key, value)) = self.take(&[key])? else {
            return Ok(None);
        };
        match &value {
            Value::String(s) if s == "_english_" => Ok(Some(StopWords::English)),
            Value::String(s) if s == "_none_" => Ok(Some(StopWords::None)),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(|words| Some(StopWords::Custom(words)))
                .ok_or_else(|| self.invalid(&key, "an array of strings", &value)),
            _ => Err(self.invalid(&key, "\"_english_\", \"_none_\" or a word list", &value)),
        }
    }

    fn finish(self) -> Result<()> {
        match self.params.keys().next() {
            None => Ok(()),
            Some(key) => Err(HastaError::invalid_parameter(format!(
                "filter '{}' does not accept parameter '{key}'",
                self.filter
            ))),
        }
    }
}
