//! Concurrent orchestrator.
//!
//! Deduplicates the input URLs, fans them out over a bounded worker pool,
//! collects outcomes as they complete and stacks the non-empty tables into one
//! combined table with a `URL` column. Per-URL failures never surface here as
//! errors; the only run-level failure is having nothing to write.

mod pool;
mod summary;

pub use summary::RunSummary;

use crate::config::{EmptyPolicy, RipperConfig};
use crate::http::Client;
use crate::storage::TableSink;
use crate::table::{combine, Table};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Knobs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of URLs fetched at the same time. Must be ≥ 1.
    pub max_workers: usize,
    /// Order row blocks by source URL; otherwise completion order is kept.
    pub sort_by_url: bool,
    pub on_empty: EmptyPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_workers: 5,
            sort_by_url: true,
            on_empty: EmptyPolicy::Error,
        }
    }
}

impl From<&RipperConfig> for BatchOptions {
    fn from(cfg: &RipperConfig) -> Self {
        Self {
            max_workers: cfg.max_workers,
            sort_by_url: cfg.sort_by_url,
            on_empty: cfg.on_empty,
        }
    }
}

/// Run-level failures.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("max_workers must be at least 1")]
    NoWorkers,
    #[error(
        "no data: none of the {attempted} URL(s) returned any rows \
         ({} HTTP, {} parse, {} other failures, {} empty); see the log for details",
        .summary.failed_http, .summary.failed_parse, .summary.failed_other, .summary.empty
    )]
    NoData { attempted: usize, summary: RunSummary },
    #[error("failed to write combined table: {0:#}")]
    Sink(anyhow::Error),
}

/// Combined table plus the counters that produced it.
#[derive(Debug)]
pub struct BatchOutput {
    pub table: Table,
    pub summary: RunSummary,
}

/// Where the output went and how the run went.
#[derive(Debug)]
pub struct RunReport {
    pub destination: String,
    pub summary: RunSummary,
}

/// Trims, drops blank entries and deduplicates.
pub fn dedup_urls<I, S>(urls: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .map(|u| u.as_ref().trim().to_string())
        .filter(|u| !u.is_empty())
        .collect()
}

/// Fetches every unique URL and returns the combined table.
pub fn run_batch<I, S>(urls: I, client: Arc<Client>, opts: &BatchOptions) -> Result<BatchOutput, RunError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if opts.max_workers == 0 {
        return Err(RunError::NoWorkers);
    }
    let unique: Vec<String> = dedup_urls(urls).into_iter().collect();
    let mut summary = RunSummary {
        unique_urls: unique.len(),
        ..RunSummary::default()
    };
    tracing::info!(
        urls = unique.len(),
        max_workers = opts.max_workers,
        max_attempts = client.policy().max_attempts,
        "starting batch"
    );

    let results = pool::dispatch(unique, client, opts.max_workers);

    let mut parts: Vec<(String, Table)> = Vec::new();
    for (url, outcome) in results {
        summary.record(&outcome);
        if let Some(table) = outcome.into_table().filter(|t| !t.is_empty()) {
            parts.push((url, table));
        }
    }

    if parts.is_empty() && opts.on_empty == EmptyPolicy::Error {
        return Err(RunError::NoData {
            attempted: summary.unique_urls,
            summary,
        });
    }
    if opts.sort_by_url {
        parts.sort_by(|a, b| a.0.cmp(&b.0));
    }

    let table = combine(parts);
    summary.rows = table.len();
    tracing::info!(
        succeeded = summary.succeeded,
        recovered = summary.recovered,
        failed_http = summary.failed_http,
        failed_parse = summary.failed_parse,
        failed_other = summary.failed_other,
        empty = summary.empty,
        rows = summary.rows,
        "batch finished"
    );
    Ok(BatchOutput { table, summary })
}

/// [`run_batch`], then writes the combined table to `sink`.
pub fn run<I, S>(
    urls: I,
    client: Arc<Client>,
    opts: &BatchOptions,
    sink: &mut dyn TableSink,
) -> Result<RunReport, RunError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let BatchOutput { table, summary } = run_batch(urls, client, opts)?;
    let destination = sink.write_table(&table).map_err(RunError::Sink)?;
    tracing::info!("combined CSV saved to {}", destination);
    Ok(RunReport {
        destination,
        summary,
    })
}
