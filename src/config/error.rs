//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid spreadsheet webhook URL format")]
    InvalidWebhookUrl,

    #[error("Spreadsheet webhook URL must use HTTPS outside development")]
    WebhookUrlMustBeHttps,

    #[error(
        "Request timeout ({request_secs}s) must exceed the save timeout ({save_secs}s)"
    )]
    RequestTimeoutNotAboveSave { request_secs: u64, save_secs: u64 },
}
