use thiserror::Error;

/// Errors that can occur while resolving identifiers against Cellar.
#[derive(Error, Debug)]
pub enum CellarError {
    #[error("transport error: {message} (endpoint: {endpoint})")]
    Transport { message: String, endpoint: String },

    #[error("endpoint returned HTTP {code} (endpoint: {endpoint})")]
    Status { code: u16, endpoint: String },

    #[error("malformed query results: {message}")]
    Results { message: String },

    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `CellarError`.
pub type Result<T> = std::result::Result<T, CellarError>;
