//! Transport error type for retry classification.

use thiserror::Error;

/// Error returned by a single GET attempt (curl failure or HTTP error status).
/// Kept separate from `anyhow` so the retry loop can classify it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

impl FetchError {
    /// The HTTP status, when the server answered with one.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http(code) => Some(*code),
            FetchError::Curl(_) => None,
        }
    }
}
