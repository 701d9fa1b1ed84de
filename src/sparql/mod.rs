//! SPARQL access to the Cellar knowledge graph.
//!
//! Builds the query texts used by the resolution flows, sends them to the
//! endpoint, and parses the JSON results document into binding rows.

/// Blocking HTTP client for the SPARQL endpoint.
pub mod client;

/// Query text builders.
pub mod queries;

/// SPARQL JSON results parsing.
pub mod results;

pub use client::{QueryService, SparqlClient};
pub use results::parse_bindings;
