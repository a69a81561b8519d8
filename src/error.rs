//! Error types for the namesake service.

use namesake_lookup::LookupError;

/// Top-level error type for the HTTP service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Listener bind or address error.
    #[error("server error: {0}")]
    Server(String),

    /// Lookup pipeline error.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;
