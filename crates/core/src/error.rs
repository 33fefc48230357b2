//! Error types for Convogate.

use thiserror::Error;

/// Result type alias using Convogate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Convogate.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Request Validation
    // =========================================================================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // =========================================================================
    // Backend (Session Client)
    // =========================================================================
    #[error("Backend error: {0}")]
    Backend(String),

    // =========================================================================
    // Normalization
    // =========================================================================
    #[error("Encoding error: {0}")]
    Encoding(String),

    // =========================================================================
    // HTTP Serving
    // =========================================================================
    #[error("Gateway error: {0}")]
    Gateway(String),

    // =========================================================================
    // Startup
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // =========================================================================
    // Generic
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create an encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create a gateway error.
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
