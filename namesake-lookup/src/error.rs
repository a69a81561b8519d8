//! Error types for the namesake-lookup crate.
//!
//! Messages are stable strings suitable for display to users and for the
//! diagnostics trail returned on a failed lookup.

/// Errors that can occur while resolving a name.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The query was missing or blank. Raised before any network call.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// Every strategy came back empty. Carries the joined diagnostics.
    #[error("no results found: {0}")]
    NotFound(String),

    /// An HTTP request to the origin failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request exceeded its per-call timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A response body could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl LookupError {
    /// Map a transport error into [`LookupError::Timeout`] or
    /// [`LookupError::Http`], prefixing `context`.
    pub(crate) fn from_reqwest(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for namesake-lookup results.
pub type Result<T> = std::result::Result<T, LookupError>;
