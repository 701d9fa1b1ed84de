use tracing::{debug, info};

use crate::sparql::{queries, QueryService};
use crate::types::*;

use super::rows_or_empty;

/// Strips every `ECLI:` label and surrounding whitespace from `input`.
pub fn normalize_ecli(input: &str) -> String {
    input.replace(ECLI_PREFIX, "").trim().to_string()
}

/// Returns the identifier forms tried for an exact match, in order: the
/// normalized form, the normalized form with the `ECLI:` label, and the
/// input as given. Repeated and empty forms are dropped.
pub fn candidate_forms(input: &str) -> Vec<String> {
    let clean = normalize_ecli(input);
    let prefixed = if clean.is_empty() {
        String::new()
    } else {
        format!("{}{}", ECLI_PREFIX, clean)
    };

    let mut forms: Vec<String> = Vec::with_capacity(3);
    for form in [clean, prefixed, input.to_string()] {
        if !form.is_empty() && !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

/// Looks up the CELEX number and title of a case-law work from its ECLI.
///
/// Exact matches are tried for each form from `candidate_forms`; when none
/// matches, a containment search over stored identifiers is run once.
pub struct EcliSearch<'a> {
    service: &'a dyn QueryService,
    language_iri: String,
    broad_limit: usize,
}

impl<'a> EcliSearch<'a> {
    /// Creates a search reading titles in `language_iri` and capping the
    /// containment search at `broad_limit` rows.
    pub fn new(
        service: &'a dyn QueryService,
        language_iri: impl Into<String>,
        broad_limit: usize,
    ) -> Self {
        Self {
            service,
            language_iri: language_iri.into(),
            broad_limit,
        }
    }

    /// Finds the work for `input`. Never fails; the negative result echoes
    /// `input` unchanged.
    pub fn find(&self, input: &str) -> EcliLookupResult {
        for candidate in candidate_forms(input) {
            debug!(candidate = %candidate, "trying exact ECLI match");
            if let Some(record) = self.exact_match(&candidate) {
                info!(candidate = %candidate, celex = ?record.celex, "ECLI matched exactly");
                return EcliLookupResult::matched(record, Some(candidate));
            }
        }

        let clean = normalize_ecli(input);
        if clean.is_empty() {
            info!(input, "nothing left of ECLI after normalization");
            return EcliLookupResult::not_found(input);
        }

        if let Some(record) = self.broad_match(&clean) {
            info!(fragment = %clean, ecli = ?record.ecli, celex = ?record.celex, "ECLI found by containment");
            let found = record.ecli.clone();
            return EcliLookupResult::matched(record, found);
        }

        info!(input, "no CELEX found for ECLI");
        EcliLookupResult::not_found(input)
    }

    fn exact_match(&self, candidate: &str) -> Option<WorkRecord> {
        let query = queries::exact_ecli(candidate, &self.language_iri);
        let row = rows_or_empty(self.service, &query, "exact", candidate)
            .into_iter()
            .next()?;
        Some(WorkRecord {
            ecli: Some(candidate.to_string()),
            ..WorkRecord::from_binding(&row, "ecli")
        })
    }

    fn broad_match(&self, fragment: &str) -> Option<WorkRecord> {
        let query = queries::broad_ecli(fragment, &self.language_iri, self.broad_limit);
        let row = rows_or_empty(self.service, &query, "broad", fragment)
            .into_iter()
            .next()?;
        Some(WorkRecord::from_binding(&row, "found_ecli"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_label_and_whitespace() {
        assert_eq!(normalize_ecli("ECLI:EU:C:2024:819"), "EU:C:2024:819");
        assert_eq!(normalize_ecli("  EU:C:2024:819 "), "EU:C:2024:819");
        assert_eq!(normalize_ecli(" ECLI:EU:C:2024:819"), "EU:C:2024:819");
    }

    #[test]
    fn test_candidates_in_order() {
        assert_eq!(
            candidate_forms(" ECLI:EU:C:2024:819"),
            vec!["EU:C:2024:819", "ECLI:EU:C:2024:819", " ECLI:EU:C:2024:819"]
        );
    }

    #[test]
    fn test_candidates_drop_duplicates() {
        assert_eq!(
            candidate_forms("EU:C:2024:819"),
            vec!["EU:C:2024:819", "ECLI:EU:C:2024:819"]
        );
        assert_eq!(
            candidate_forms("ECLI:EU:C:2024:819"),
            vec!["EU:C:2024:819", "ECLI:EU:C:2024:819"]
        );
    }

    #[test]
    fn test_candidates_for_bare_label() {
        assert_eq!(candidate_forms("ECLI:"), vec!["ECLI:"]);
    }
}
