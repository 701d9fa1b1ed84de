use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CellarError, Result};

/// One result row: SPARQL variable name to bound lexical value.
pub type Binding = HashMap<String, String>;

/// Ordered rows returned by a single SELECT query.
pub type BindingSet = Vec<Binding>;

/// Inclusive character bounds accepted for a CELEX number.
pub const CELEX_LEN: (usize, usize) = (5, 30);

/// Inclusive character bounds accepted for a case-law identifier.
pub const ECLI_LEN: (usize, usize) = (10, 50);

/// Literal label that may prefix a case-law identifier.
pub const ECLI_PREFIX: &str = "ECLI:";

/// Leading character of CELEX numbers in the case-law sector.
pub const JUDICIAL_SECTOR: char = '6';

/// A work resource in the Cellar graph as seen by one query row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkRecord {
    /// Cellar URI of the work (may be empty when the query did not project it).
    pub uri: String,
    pub celex: Option<String>,
    pub ecli: Option<String>,
    pub title: Option<String>,
}

impl WorkRecord {
    /// Builds a record from a binding row, reading the `work`, `celex`,
    /// `title` variables and the given variable for the case-law identifier.
    pub fn from_binding(row: &Binding, ecli_var: &str) -> Self {
        Self {
            uri: row.get("work").cloned().unwrap_or_default(),
            celex: row.get("celex").cloned(),
            ecli: row.get(ecli_var).cloned(),
            title: row.get("title").cloned(),
        }
    }

    /// True when the record carries a non-empty title.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// True when the record carries a non-empty case-law identifier.
    pub fn has_ecli(&self) -> bool {
        self.ecli.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Outcome of validating a CELEX number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub title: Option<String>,
    pub ecli: Option<String>,
}

impl ValidationResult {
    /// The negative result used for unknown works and any failure.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            title: None,
            ecli: None,
        }
    }
}

/// Outcome of looking up a CELEX number by case-law identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcliLookupResult {
    pub found: bool,
    pub celex: Option<String>,
    pub title: Option<String>,
    pub ecli: Option<String>,
}

impl EcliLookupResult {
    /// The negative result; echoes the caller's input unchanged.
    pub fn not_found(input: &str) -> Self {
        Self {
            found: false,
            celex: None,
            title: None,
            ecli: Some(input.to_string()),
        }
    }

    /// A positive result for `record`, reporting `ecli` as the matched identifier.
    pub fn matched(record: WorkRecord, ecli: Option<String>) -> Self {
        Self {
            found: true,
            celex: record.celex,
            title: record.title,
            ecli,
        }
    }
}

/// Returns true for CELEX numbers in the case-law sector.
pub fn is_judicial_celex(celex: &str) -> bool {
    celex.starts_with(JUDICIAL_SECTOR)
}

/// Checks that `value` has between `bounds.0` and `bounds.1` characters.
pub fn check_length(field: &str, value: &str, bounds: (usize, usize)) -> Result<()> {
    let len = value.chars().count();
    if len < bounds.0 || len > bounds.1 {
        return Err(CellarError::InvalidInput {
            field: field.to_string(),
            message: format!(
                "length must be between {} and {} characters, got {}",
                bounds.0, bounds.1, len
            ),
        });
    }
    Ok(())
}
