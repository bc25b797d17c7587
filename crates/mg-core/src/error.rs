//! Error types for mg-core

use thiserror::Error;

/// Core error type for Migrate
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {source}")]
    ConfigParseError {
        path: String,
        source: serde_json::Error,
    },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Lock file exists but is not a valid ledger
    #[error("[E004] Failed to parse lock file {path}: {source}")]
    LockParseError {
        path: String,
        source: serde_json::Error,
    },

    /// E005: Location glob pattern is malformed
    #[error("[E005] Invalid location pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// E006: IO error with file path context
    #[error("[E006] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        }
    }
}
