//! Full-text queries over the `content` field.
//!
//! A [`Query`] is rendered to the engine's query DSL with
//! [`Query::to_json`]; scoring and execution stay with the engine.
//!
//! ```
//! use hasta::query::Query;
//! use serde_json::json;
//!
//! let query = Query::all_of("content", ["Indonesian", "tourist"]);
//! assert_eq!(
//!     query.to_json(),
//!     json!({
//!         "bool": {
//!             "must": [
//!                 { "match": { "content": "Indonesian" } },
//!                 { "match": { "content": "tourist" } }
//!             ]
//!         }
//!     })
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A query against one text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Analyzed terms, any of which may match.
    Match { field: String, text: String },
    /// Every clause must match.
    Bool { must: Vec<Query> },
    /// The analyzed terms in order, adjacent.
    MatchPhrase { field: String, text: String },
}

impl Query {
    /// A `match` query.
    pub fn matching<F: Into<String>, T: Into<String>>(field: F, text: T) -> Self {
        Query::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    /// A `match_phrase` query.
    pub fn phrase<F: Into<String>, T: Into<String>>(field: F, text: T) -> Self {
        Query::MatchPhrase {
            field: field.into(),
            text: text.into(),
        }
    }

    /// A `bool` query whose clauses all must match.
    pub fn must<I: IntoIterator<Item = Query>>(clauses: I) -> Self {
        Query::Bool {
            must: clauses.into_iter().collect(),
        }
    }

    /// A `bool` query requiring one `match` clause per term.
    pub fn all_of<F, I, T>(field: F, terms: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let field = field.into();
        Query::must(
            terms
                .into_iter()
                .map(|term| Query::matching(field.clone(), term)),
        )
    }

    /// Render to the query DSL (the value of the request's `query` key).
    pub fn to_json(&self) -> Value {
        match self {
            Query::Match { field, text } => json!({ "match": { field.as_str(): text } }),
            Query::MatchPhrase { field, text } => {
                json!({ "match_phrase": { field.as_str(): text } })
            }
            Query::Bool { must } => json!({
                "bool": { "must": must.iter().map(Query::to_json).collect::<Vec<_>>() }
            }),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Match { field, text } => write!(f, "{field}:{text}"),
            Query::MatchPhrase { field, text } => write!(f, "{field}:\"{text}\""),
            Query::Bool { must } => {
                let clauses: Vec<String> = must.iter().map(|q| q.to_string()).collect();
                write!(f, "({})", clauses.join(" AND "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match() {
        let query = Query::matching("content", "Singapore");
        assert_eq!(
            query.to_json(),
            json!({ "match": { "content": "Singapore" } })
        );
        assert_eq!(query.to_string(), "content:Singapore");
    }

    #[test]
    fn test_phrase() {
        let query = Query::phrase("content", "Indonesian tourist");
        assert_eq!(
            query.to_json(),
            json!({ "match_phrase": { "content": "Indonesian tourist" } })
        );
        assert_eq!(query.to_string(), "content:\"Indonesian tourist\"");
    }

    #[test]
    fn test_bool_display() {
        let query = Query::all_of("content", ["Indonesian", "tourist"]);
        assert_eq!(
            query.to_string(),
            "(content:Indonesian AND content:tourist)"
        );
    }

    #[test]
    fn test_empty_bool() {
        let query = Query::must(Vec::new());
        assert_eq!(query.to_json(), json!({ "bool": { "must": [] } }));
    }
}
