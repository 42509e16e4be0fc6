//! Per-URL worker result.

use crate::retry::FetchError;
use crate::table::{ParseError, Table};
use thiserror::Error;

/// Failure category, used for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Http,
    Parse,
    Other,
}

/// A fetch that produced no table. `url` is always the print-view URL that was
/// requested (or the raw input when it could not be parsed).
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// Non-2xx status outside the retry set, or retries exhausted.
    #[error("HTTP error occurred while downloading {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: FetchError,
    },
    /// Neither the strict nor the lenient parse found a header.
    #[error("parsing error for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
    /// Anything else: transport failure, undecodable body, bad input URL.
    #[error("an error occurred while downloading {url}: {message}")]
    Other { url: String, message: String },
}

impl FetchFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchFailure::Http { .. } => FailureKind::Http,
            FetchFailure::Parse { .. } => FailureKind::Parse,
            FetchFailure::Other { .. } => FailureKind::Other,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchFailure::Http { url, .. }
            | FetchFailure::Parse { url, .. }
            | FetchFailure::Other { url, .. } => url,
        }
    }
}

/// What one worker invocation produced.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Strict parse succeeded.
    Success(Table),
    /// Strict parse failed; `table` comes from the lenient re-parse.
    Recovered { table: Table, cause: ParseError },
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn table(&self) -> Option<&Table> {
        match self {
            FetchOutcome::Success(t) | FetchOutcome::Recovered { table: t, .. } => Some(t),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            FetchOutcome::Success(t) | FetchOutcome::Recovered { table: t, .. } => Some(t),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchOutcome::Failed(f) => Some(f),
            _ => None,
        }
    }
}
