//! CLI for ripper: download print-view CSVs for a URL list and combine them.

mod input;

use anyhow::{Context, Result};
use clap::Parser;
use ripper_core::batch::{self, BatchOptions, RunSummary};
use ripper_core::config::{self, RipperConfig};
use ripper_core::http::Client;
use ripper_core::storage::CsvFileSink;
use std::path::PathBuf;
use std::sync::Arc;

pub use input::read_url_list;

/// Download and combine CSV files from a list of URLs.
#[derive(Debug, Parser)]
#[command(name = "ripper")]
#[command(about = "Download and combine print-view CSV files from a list of URLs", long_about = None)]
pub struct Cli {
    /// Text file with one URL per line (blank lines and `#` comments are skipped).
    pub input: PathBuf,

    /// Where to write the combined CSV.
    pub output: PathBuf,

    /// Fetch up to N URLs concurrently (overrides `max_workers` from the config file).
    #[arg(long, value_name = "N")]
    pub max_workers: Option<usize>,

    /// Read configuration from this file instead of ~/.config/ripper/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write per-outcome counts as JSON to this path.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Log to ~/.local/state/ripper/ripper.log instead of stderr.
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    /// Effective configuration: file (explicit or XDG default) plus CLI overrides.
    pub fn load_config(&self) -> Result<RipperConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        if let Some(n) = self.max_workers {
            cfg.max_workers = n;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub async fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let urls = read_url_list(&self.input)?;
        tracing::info!("read {} URL line(s) from {}", urls.len(), self.input.display());

        let client = Arc::new(Client::new(cfg.client_options(), cfg.retry_policy()));
        let opts = BatchOptions::from(&cfg);
        let output = self.output.clone();
        let report = tokio::task::spawn_blocking(move || {
            let mut sink = CsvFileSink::new(output);
            batch::run(urls, client, &opts, &mut sink)
        })
        .await
        .context("fetch task join")??;

        let s = &report.summary;
        eprintln!("{}", report_line(s));
        if let Some(path) = &self.summary {
            s.write_json(path)?;
        }
        println!("Combined CSV saved to {}", report.destination);
        Ok(())
    }
}

/// One-line count report printed to stderr after a run.
fn report_line(s: &RunSummary) -> String {
    format!(
        "{} URL(s): {} contributed ({} recovered), {} failed ({} HTTP, {} parse, {} other), {} empty, {} rows",
        s.unique_urls,
        s.contributing(),
        s.recovered,
        s.failed(),
        s.failed_http,
        s.failed_parse,
        s.failed_other,
        s.empty,
        s.rows
    )
}

#[cfg(test)]
mod tests;
