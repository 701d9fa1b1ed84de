//! Parsing of the `application/sparql-results+json` document.
//!
//! Only the SELECT shape is supported: `results.bindings[i][var].value`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::{CellarError, Result};
use crate::types::{Binding, BindingSet};

/// A single RDF term bound to a variable.
#[derive(Debug, Clone, Deserialize)]
pub struct RdfTerm {
    /// `uri`, `literal`, `typed-literal` or `bnode`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    results: Option<ResultsSection>,
}

#[derive(Debug, Deserialize)]
struct ResultsSection {
    #[serde(default)]
    bindings: Vec<HashMap<String, RdfTerm>>,
}

/// Parses a SPARQL JSON results body into binding rows.
///
/// A document without `results` or `bindings` is an empty answer. A body that
/// is not JSON or does not have the SELECT shape is a `Results` error. Terms
/// without a `value` are dropped from their row.
pub fn parse_bindings(body: &str) -> Result<BindingSet> {
    let document: ResultsDocument =
        serde_json::from_str(body).map_err(|e| CellarError::Results {
            message: e.to_string(),
        })?;

    let rows = document
        .results
        .map(|section| section.bindings)
        .unwrap_or_default();

    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .filter_map(|(var, term)| term.value.map(|value| (var, value)))
                .collect::<Binding>()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_rows() {
        let body = r#"{
            "head": {"vars": ["celex", "title"]},
            "results": {"bindings": [
                {"celex": {"type": "literal", "value": "62019CJ0311"},
                 "title": {"type": "literal", "xml:lang": "en", "value": "Judgment of the Court"}},
                {"celex": {"type": "literal", "value": "62019CO0311"}}
            ]}
        }"#;

        let rows = parse_bindings(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["celex"], "62019CJ0311");
        assert_eq!(rows[0]["title"], "Judgment of the Court");
        assert!(!rows[1].contains_key("title"));
    }

    #[test]
    fn test_missing_sections_are_empty() {
        assert!(parse_bindings("{}").unwrap().is_empty());
        assert!(parse_bindings(r#"{"results": {}}"#).unwrap().is_empty());
        assert!(parse_bindings(r#"{"results": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_term_without_value_is_dropped() {
        let body = r#"{"results": {"bindings": [{"work": {"type": "uri"}}]}}"#;
        let rows = parse_bindings(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_empty());
    }

    #[test]
    fn test_html_body_is_an_error() {
        let err = parse_bindings("<html><body>Service Unavailable</body></html>").unwrap_err();
        assert!(matches!(err, CellarError::Results { .. }));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let err = parse_bindings(r#"{"results": {"bindings": "nope"}}"#).unwrap_err();
        assert!(matches!(err, CellarError::Results { .. }));
    }
}
