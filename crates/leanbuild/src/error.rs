//! Error types for leanbuild

use thiserror::Error;

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database-proxy operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Missing or malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Network-level failure talking to the proxy
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timed out
    #[error("Query timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// The proxy answered with a non-success status
    #[error("Proxy error (status {status}): {message}")]
    Proxy { status: u16, message: String },

    /// Row decode/mapping error
    #[error("Decode error: {0}")]
    Decode(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DbError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
