//! SPARQL query texts for the Cellar CDM ontology.
//!
//! Values are interpolated into the query text; string literals are escaped
//! and IRIs are checked against the IRIREF character set first.

/// Namespace of the Common Data Model ontology.
pub const CDM_NS: &str = "http://publications.europa.eu/ontology/cdm#";

/// Namespace of OWL.
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";

/// Escapes a value for use inside a double-quoted SPARQL string literal.
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns true if `iri` can be written between `<` and `>` unchanged.
pub fn is_iriref_safe(iri: &str) -> bool {
    !iri.is_empty()
        && iri.chars().all(|c| {
            !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') && c > ' '
        })
}

/// Finds the work whose CELEX number is exactly `celex`.
pub fn resolve_work(celex: &str) -> String {
    format!(
        r#"PREFIX cdm: <{cdm}>
SELECT DISTINCT ?work WHERE {{
  ?work cdm:resource_legal_id_celex ?id .
  FILTER(str(?id) = "{celex}")
}}"#,
        cdm = CDM_NS,
        celex = escape_literal(celex),
    )
}

/// Finds a title in `language_iri` and a case-law identifier for the work
/// at `work_uri`, following `owl:sameAs` in both directions.
///
/// Returns `None` when `work_uri` cannot be embedded as an IRI.
pub fn title_and_ecli(work_uri: &str, language_iri: &str) -> Option<String> {
    if !is_iriref_safe(work_uri) || !is_iriref_safe(language_iri) {
        return None;
    }
    Some(format!(
        r#"PREFIX cdm: <{cdm}>
PREFIX owl: <{owl}>
SELECT DISTINCT ?title ?ecli WHERE {{
  ?s (owl:sameAs|^owl:sameAs)* <{work}> .
  ?ex (cdm:expression_belongs_to_work|^cdm:work_has_expression) ?s .

  OPTIONAL {{
    ?ex cdm:expression_uses_language <{lang}> .
    ?ex cdm:expression_title ?title .
  }}

  OPTIONAL {{
    ?ex cdm:expression_has_manifestation ?manif .
    ?manif cdm:manifestation_title ?title .
    ?manif cdm:manifestation_uses_language <{lang}> .
  }}

  OPTIONAL {{
    ?s cdm:case-law_ecli ?ecli .
  }}
}}
LIMIT 1"#,
        cdm = CDM_NS,
        owl = OWL_NS,
        work = work_uri,
        lang = language_iri,
    ))
}

/// Finds the work whose case-law identifier is exactly `ecli`, with its
/// CELEX number and a title in `language_iri`.
pub fn exact_ecli(ecli: &str, language_iri: &str) -> String {
    format!(
        r#"PREFIX cdm: <{cdm}>
SELECT DISTINCT ?work ?celex ?title WHERE {{
  ?work cdm:case-law_ecli "{ecli}" .
  ?work cdm:resource_legal_id_celex ?celex .

  OPTIONAL {{
    ?ex cdm:expression_belongs_to_work ?work .
    ?ex cdm:expression_uses_language <{lang}> .
    ?ex cdm:expression_title ?title .
  }}

  OPTIONAL {{
    ?ex cdm:expression_belongs_to_work ?work .
    ?ex cdm:expression_has_manifestation ?manif .
    ?manif cdm:manifestation_title ?title .
    ?manif cdm:manifestation_uses_language <{lang}> .
  }}
}}
LIMIT 1"#,
        cdm = CDM_NS,
        ecli = escape_literal(ecli),
        lang = language_iri,
    )
}

/// Finds works whose case-law identifier contains `fragment`, capped at
/// `limit` rows. The matched identifier is projected as `?found_ecli`.
pub fn broad_ecli(fragment: &str, language_iri: &str, limit: usize) -> String {
    format!(
        r#"PREFIX cdm: <{cdm}>
SELECT DISTINCT ?work ?celex ?title ?found_ecli WHERE {{
  ?work cdm:case-law_ecli ?found_ecli .
  ?work cdm:resource_legal_id_celex ?celex .
  FILTER(CONTAINS(str(?found_ecli), "{fragment}"))

  OPTIONAL {{
    ?ex cdm:expression_belongs_to_work ?work .
    ?ex cdm:expression_uses_language <{lang}> .
    ?ex cdm:expression_title ?title .
  }}
}}
LIMIT {limit}"#,
        cdm = CDM_NS,
        fragment = escape_literal(fragment),
        lang = language_iri,
        limit = limit,
    )
}
