use tracing::{debug, info};

use crate::sparql::{queries, QueryService};
use crate::types::*;

use super::rows_or_empty;

/// Validates CELEX numbers and fetches their title and case-law identifier.
///
/// Resolution is two queries: the exact CELEX match yields the work URI, then
/// the `owl:sameAs` closure of that work is searched for a title and an ECLI.
pub struct CelexResolver<'a> {
    service: &'a dyn QueryService,
    language_iri: String,
}

impl<'a> CelexResolver<'a> {
    /// Creates a resolver that reads titles in the language `language_iri`.
    pub fn new(service: &'a dyn QueryService, language_iri: impl Into<String>) -> Self {
        Self {
            service,
            language_iri: language_iri.into(),
        }
    }

    /// Validates `celex`, returning the negative result for unknown works and
    /// for any query failure.
    pub fn validate(&self, celex: &str) -> ValidationResult {
        let Some(work_uri) = self.resolve_work(celex) else {
            info!(celex, "no work found for CELEX");
            return ValidationResult::invalid();
        };

        match self.fetch_details(celex, &work_uri) {
            Some(record) => decide_validity(celex, record),
            None => ValidationResult::invalid(),
        }
    }

    /// Returns the URI of the first work whose CELEX number equals `celex`.
    fn resolve_work(&self, celex: &str) -> Option<String> {
        let rows = rows_or_empty(self.service, &queries::resolve_work(celex), "resolve", celex);
        let uri = rows.into_iter().next()?.remove("work")?;
        debug!(celex, work = %uri, "resolved CELEX to work");
        Some(uri)
    }

    /// Fetches the first title/ECLI row for the work at `work_uri`.
    fn fetch_details(&self, celex: &str, work_uri: &str) -> Option<WorkRecord> {
        let query = queries::title_and_ecli(work_uri, &self.language_iri)?;
        let row = rows_or_empty(self.service, &query, "title", celex)
            .into_iter()
            .next()?;

        Some(WorkRecord {
            uri: work_uri.to_string(),
            celex: Some(celex.to_string()),
            ..WorkRecord::from_binding(&row, "ecli")
        })
    }
}

/// Applies the validity rule to a resolved work.
///
/// A work is valid with a non-empty title. Case-law works (CELEX starting
/// with `6`) are also valid with only a case-law identifier. Whatever was
/// found is reported either way.
pub fn decide_validity(celex: &str, record: WorkRecord) -> ValidationResult {
    let valid = record.has_title() || (is_judicial_celex(celex) && record.has_ecli());
    ValidationResult {
        valid,
        title: record.title,
        ecli: record.ecli,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: Option<&str>, ecli: Option<&str>) -> WorkRecord {
        WorkRecord {
            title: title.map(str::to_string),
            ecli: ecli.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_makes_valid() {
        let result = decide_validity("32019R0947", record(Some("Regulation"), None));
        assert!(result.valid);
        assert_eq!(result.title.as_deref(), Some("Regulation"));
    }

    #[test]
    fn test_judicial_ecli_without_title_is_valid() {
        let result = decide_validity("62019CJ0311", record(None, Some("ECLI:EU:C:2020:559")));
        assert!(result.valid);
        assert!(result.title.is_none());
    }

    #[test]
    fn test_non_judicial_ecli_without_title_is_invalid() {
        let result = decide_validity("32019R0947", record(None, Some("ECLI:EU:C:2020:559")));
        assert!(!result.valid);
        assert_eq!(result.ecli.as_deref(), Some("ECLI:EU:C:2020:559"));
    }

    #[test]
    fn test_empty_values_do_not_count() {
        let result = decide_validity("62019CJ0311", record(Some(""), Some("")));
        assert!(!result.valid);
        assert_eq!(result.title.as_deref(), Some(""));
    }
}
