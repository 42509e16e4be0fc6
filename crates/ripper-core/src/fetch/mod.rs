//! Fetch-retry-normalize worker.
//!
//! One call handles one input URL end to end: rewrite to the print view, GET
//! through the shared client, parse (strict, then lenient on failure) and
//! title-case text columns. Every failure is logged here and returned as a
//! [`FetchOutcome::Failed`]; nothing propagates to the caller.

mod outcome;

pub use outcome::{FailureKind, FetchFailure, FetchOutcome};

use crate::http::Client;
use crate::retry::FetchError;
use crate::table::{normalize_text_columns, parse_lenient, parse_strict};
use crate::url_model::print_version_url_str;

const UTF8_BOM: &str = "\u{feff}";

/// Fetches the print view of `url` and returns its normalized table.
pub fn fetch_and_normalize(client: &Client, url: &str) -> FetchOutcome {
    let target = match print_version_url_str(url) {
        Ok(t) => t,
        Err(e) => {
            return failed(FetchFailure::Other {
                url: url.to_string(),
                message: format!("invalid URL: {}", e),
            })
        }
    };
    tracing::debug!(url = %target, "fetching");

    // Buffered once; both parse attempts read the same text.
    let body = match client.get(&target) {
        Ok(b) => b,
        Err(e @ FetchError::Http(_)) => {
            return failed(FetchFailure::Http {
                url: target,
                source: e,
            })
        }
        Err(FetchError::Curl(e)) => {
            return failed(FetchFailure::Other {
                url: target,
                message: e.to_string(),
            })
        }
    };

    let text = match std::str::from_utf8(&body) {
        Ok(s) => s.strip_prefix(UTF8_BOM).unwrap_or(s),
        Err(e) => {
            return failed(FetchFailure::Other {
                url: target,
                message: format!("response is not valid UTF-8: {}", e),
            })
        }
    };

    match parse_strict(text) {
        Ok(mut table) => {
            normalize_text_columns(&mut table);
            tracing::debug!(url = %target, rows = table.len(), "parsed");
            FetchOutcome::Success(table)
        }
        Err(cause) => {
            tracing::warn!(url = %target, "parsing error: {}; retrying leniently", cause);
            match parse_lenient(text) {
                Ok(lenient) => {
                    let mut table = lenient.table;
                    normalize_text_columns(&mut table);
                    tracing::info!(
                        url = %target,
                        rows = table.len(),
                        skipped = lenient.skipped,
                        "lenient parse recovered"
                    );
                    FetchOutcome::Recovered { table, cause }
                }
                Err(e) => failed(FetchFailure::Parse {
                    url: target,
                    source: e,
                }),
            }
        }
    }
}

fn failed(f: FetchFailure) -> FetchOutcome {
    tracing::warn!("{}", f);
    FetchOutcome::Failed(f)
}
