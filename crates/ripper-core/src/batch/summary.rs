//! Outcome counters for one run.

use crate::fetch::{FailureKind, FetchOutcome};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Counts per outcome, logged at the end of a run and optionally saved as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Distinct non-blank input URLs dispatched.
    pub unique_urls: usize,
    /// Strictly parsed tables with at least one row.
    pub succeeded: usize,
    /// Tables with at least one row that needed the lenient re-parse.
    pub recovered: usize,
    pub failed_http: usize,
    pub failed_parse: usize,
    pub failed_other: usize,
    /// Fetches that parsed but held no rows.
    pub empty: usize,
    /// Rows in the combined table.
    pub rows: usize,
}

impl RunSummary {
    pub(super) fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Success(t) | FetchOutcome::Recovered { table: t, .. } if t.is_empty() => {
                self.empty += 1
            }
            FetchOutcome::Success(_) => self.succeeded += 1,
            FetchOutcome::Recovered { .. } => self.recovered += 1,
            FetchOutcome::Failed(f) => match f.kind() {
                FailureKind::Http => self.failed_http += 1,
                FailureKind::Parse => self.failed_parse += 1,
                FailureKind::Other => self.failed_other += 1,
            },
        }
    }

    /// URLs that contributed rows.
    pub fn contributing(&self) -> usize {
        self.succeeded + self.recovered
    }

    /// URLs that failed outright.
    pub fn failed(&self) -> usize {
        self.failed_http + self.failed_parse + self.failed_other
    }

    /// Saves the counters as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize run summary")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
