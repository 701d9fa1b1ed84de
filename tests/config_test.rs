use cellar_lookup::config::*;
use cellar_lookup::errors::CellarError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_config_points_at_cellar() {
    let config = CellarConfig::default();
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.result_format, "application/sparql-results+json");
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.broad_search_limit, 5);
    assert_eq!(
        config.language_iri(),
        "http://publications.europa.eu/resource/authority/language/ENG"
    );
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(&dir.path().join(CONFIG_FILENAME)).unwrap();
    assert_eq!(loaded, CellarConfig::default());
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILENAME);
    let config = CellarConfig {
        endpoint: "http://localhost:8890/sparql".to_string(),
        timeout_secs: 3,
        ..CellarConfig::default()
    };

    save_config(&path, &config).unwrap();
    assert!(!path.with_extension("tmp").exists());

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(&path, r#"{"language": "DEU"}"#).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.language, "DEU");
    assert_eq!(loaded.endpoint, DEFAULT_ENDPOINT);
}

#[test]
fn test_unparsable_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(&path, "endpoint = 'toml?'").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, CellarError::Config { .. }));
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_endpoint = CellarConfig {
        endpoint: "ftp://example.org".to_string(),
        ..CellarConfig::default()
    };
    assert!(validate_config(&bad_endpoint).is_err());

    let zero_timeout = CellarConfig {
        timeout_secs: 0,
        ..CellarConfig::default()
    };
    assert!(validate_config(&zero_timeout).is_err());

    let bad_language = CellarConfig {
        language: "EN>G".to_string(),
        ..CellarConfig::default()
    };
    assert!(validate_config(&bad_language).is_err());
}
