use tracing::debug;

use crate::config::CellarConfig;
use crate::errors::{CellarError, Result};
use crate::types::BindingSet;

use super::results::parse_bindings;

/// A graph-query service that answers SELECT queries with binding rows.
///
/// Implementations report transport problems, non-success statuses and
/// malformed bodies as errors; an empty answer is `Ok` with no rows.
pub trait QueryService: Send + Sync {
    /// Runs a complete SELECT query text and returns its rows.
    fn select(&self, query: &str) -> Result<BindingSet>;
}

/// Blocking SPARQL client for the Cellar endpoint.
///
/// Each query is sent as a form-encoded POST with `query` and `format`
/// fields. The client keeps no per-request state and can be shared freely.
pub struct SparqlClient {
    agent: ureq::Agent,
    endpoint: String,
    result_format: String,
}

impl SparqlClient {
    /// Creates a client for the endpoint, format and timeout in `config`.
    pub fn new(config: &CellarConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build()
            .into();

        Self {
            agent,
            endpoint: config.endpoint.clone(),
            result_format: config.result_format.clone(),
        }
    }

    /// Returns the endpoint URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, err: ureq::Error) -> CellarError {
        match err {
            ureq::Error::StatusCode(code) => CellarError::Status {
                code,
                endpoint: self.endpoint.clone(),
            },
            other => CellarError::Transport {
                message: other.to_string(),
                endpoint: self.endpoint.clone(),
            },
        }
    }
}

impl QueryService for SparqlClient {
    fn select(&self, query: &str) -> Result<BindingSet> {
        debug!(endpoint = %self.endpoint, bytes = query.len(), "sending SPARQL query");

        let mut response = self
            .agent
            .post(self.endpoint.as_str())
            .header("Accept", self.result_format.as_str())
            .send_form([("query", query), ("format", self.result_format.as_str())])
            .map_err(|e| self.request_error(e))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| self.request_error(e))?;

        let rows = parse_bindings(&body)?;
        debug!(rows = rows.len(), "SPARQL query answered");
        Ok(rows)
    }
}
