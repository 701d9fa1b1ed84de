//! Identifier resolution against the Cellar graph.
//!
//! Two independent flows share the query service: CELEX validation
//! (`CelexResolver`) and the reverse lookup from a case-law identifier
//! (`EcliSearch`). Neither flow returns errors; query failures are logged and
//! treated as empty answers.
mod celex;
mod ecli;

pub use celex::{decide_validity, CelexResolver};
pub use ecli::{candidate_forms, normalize_ecli, EcliSearch};

use tracing::warn;

use crate::sparql::QueryService;
use crate::types::BindingSet;

/// Runs `query`, turning any failure into an empty row set.
///
/// `step` names the query for the diagnostic and `subject` is the identifier
/// being resolved.
fn rows_or_empty(service: &dyn QueryService, query: &str, step: &str, subject: &str) -> BindingSet {
    match service.select(query) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(step, subject, error = %e, "SPARQL query failed, treating as no results");
            Vec::new()
        }
    }
}
