use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{CellarError, Result};

/// Default name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "cellar-lookup.json";

/// Public SPARQL endpoint of the Publications Office Cellar repository.
pub const DEFAULT_ENDPOINT: &str = "https://publications.europa.eu/webapi/rdf/sparql";

/// Result serialization requested from the endpoint.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Base IRI of the EU language authority table.
pub const LANGUAGE_AUTHORITY: &str = "http://publications.europa.eu/resource/authority/language/";

/// Configuration for talking to the Cellar SPARQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellarConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// SPARQL endpoint URL queries are POSTed to.
    pub endpoint: String,
    /// Value sent as the `format` form field.
    pub result_format: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Three-letter authority code of the title language (e.g. `ENG`).
    pub language: String,
    /// Row cap for the broad ECLI containment search.
    pub broad_search_limit: usize,
}

impl Default for CellarConfig {
    fn default() -> Self {
        Self {
            version: 1,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            result_format: SPARQL_RESULTS_JSON.to_string(),
            timeout_secs: 15,
            language: "ENG".to_string(),
            broad_search_limit: 5,
        }
    }
}

impl CellarConfig {
    /// Returns the per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the full authority IRI for the configured title language.
    pub fn language_iri(&self) -> String {
        format!("{}{}", LANGUAGE_AUTHORITY, self.language)
    }
}

/// Loads the configuration from disk.
///
/// If the file does not exist, returns the default configuration. Fields
/// missing from the file take their default values.
pub fn load_config(path: &Path) -> Result<CellarConfig> {
    if !path.exists() {
        return Ok(CellarConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| CellarError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: CellarConfig =
        serde_json::from_str(&contents).map_err(|e| CellarError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;

    validate_config(&config)?;
    Ok(config)
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final location,
/// so a partial write never corrupts the configuration.
pub fn save_config(path: &Path, config: &CellarConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CellarError::Config {
            message: format!(
                "failed to create config directory '{}': {}",
                parent.display(),
                e
            ),
        })?;
    }

    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| CellarError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| CellarError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| CellarError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}

/// Rejects configurations that cannot produce a working client.
pub fn validate_config(config: &CellarConfig) -> Result<()> {
    if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
        return Err(CellarError::Config {
            message: format!("endpoint must be an http(s) URL, got '{}'", config.endpoint),
        });
    }
    if config.timeout_secs == 0 {
        return Err(CellarError::Config {
            message: "timeout_secs must be greater than zero".to_string(),
        });
    }
    if config.broad_search_limit == 0 {
        return Err(CellarError::Config {
            message: "broad_search_limit must be greater than zero".to_string(),
        });
    }
    if config.language.is_empty() || !config.language.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CellarError::Config {
            message: format!("language must be an authority code, got '{}'", config.language),
        });
    }
    Ok(())
}
