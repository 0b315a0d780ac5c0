//! Error types for poolscope

use thiserror::Error;

/// Core error type for poolscope operations
///
/// Event handling never produces these; they only surface from endpoint
/// parsing, configuration loading, logging bootstrap and readiness waits.
#[derive(Error, Debug)]
pub enum PoolscopeError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for poolscope operations
pub type Result<T> = std::result::Result<T, PoolscopeError>;
