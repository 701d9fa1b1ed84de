use tracing::info;

use crate::config::{validate_config, CellarConfig};
use crate::errors::Result;
use crate::resolution::{CelexResolver, EcliSearch};
use crate::sparql::{QueryService, SparqlClient};
use crate::types::*;

/// Entry point tying the query service and configuration to the two
/// resolution flows.
///
/// Holds no per-request state; one instance can serve any number of callers.
pub struct Cellar {
    service: Box<dyn QueryService>,
    config: CellarConfig,
}

impl Cellar {
    /// Creates an instance talking to the SPARQL endpoint named in `config`.
    pub fn new(config: CellarConfig) -> Result<Self> {
        validate_config(&config)?;
        let client = SparqlClient::new(&config);
        info!(endpoint = client.endpoint(), timeout_secs = config.timeout_secs, "using SPARQL endpoint");
        Ok(Self {
            service: Box::new(client),
            config,
        })
    }

    /// Creates an instance backed by an arbitrary query service.
    pub fn with_service(service: Box<dyn QueryService>, config: CellarConfig) -> Self {
        Self { service, config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CellarConfig {
        &self.config
    }

    /// Validates a CELEX number and reports its English title and ECLI.
    pub fn validate(&self, celex: &str) -> ValidationResult {
        info!(celex, "validating CELEX");
        CelexResolver::new(self.service.as_ref(), self.config.language_iri()).validate(celex)
    }

    /// Finds the CELEX number and title for a case-law identifier.
    pub fn find_by_ecli(&self, ecli: &str) -> EcliLookupResult {
        info!(ecli, "searching CELEX by ECLI");
        EcliSearch::new(
            self.service.as_ref(),
            self.config.language_iri(),
            self.config.broad_search_limit,
        )
        .find(ecli)
    }

    /// Checks the input length and validates a CELEX number.
    pub fn validate_checked(&self, celex: &str) -> Result<ValidationResult> {
        check_length("celex", celex, CELEX_LEN)?;
        Ok(self.validate(celex))
    }

    /// Checks the input length and searches by case-law identifier.
    pub fn find_by_ecli_checked(&self, ecli: &str) -> Result<EcliLookupResult> {
        check_length("ecli", ecli, ECLI_LEN)?;
        Ok(self.find_by_ecli(ecli))
    }
}
