//! Error types for the asset permission provider
//!
//! Permission queries are total and never return these; errors only occur
//! while loading and validating configuration.

use thiserror::Error;

/// Authorization configuration errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Content store error (invalid path and similar)
    #[error("Store error: {0}")]
    Store(#[from] assetguard_core::CoreError),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
