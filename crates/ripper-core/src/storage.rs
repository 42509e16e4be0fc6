//! Output sink for the combined table.
//!
//! The CSV file sink writes to `<destination>.part`, syncs, then renames over
//! the destination so a failed run never leaves a half-written output behind.

use crate::table::{write_csv, Table};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Where the combined table goes. Written once per run, after all workers finish.
pub trait TableSink {
    /// Stores `table` and returns a human-readable description of the destination.
    fn write_table(&mut self, table: &Table) -> Result<String>;
}

/// Writes the table as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for CsvFileSink {
    fn write_table(&mut self, table: &Table) -> Result<String> {
        let tp = temp_path(&self.path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tp)
            .with_context(|| format!("failed to create temp file: {}", tp.display()))?;

        let finished = write_synced(table, file, &tp).and_then(|()| {
            std::fs::rename(&tp, &self.path).with_context(|| {
                format!("failed to rename {} to {}", tp.display(), self.path.display())
            })
        });
        if let Err(e) = finished {
            if let Err(rm) = std::fs::remove_file(&tp) {
                tracing::warn!("could not remove {}: {}", tp.display(), rm);
            }
            return Err(e);
        }
        Ok(self.path.display().to_string())
    }
}

fn write_synced(table: &Table, file: File, tp: &Path) -> Result<()> {
    let mut out = BufWriter::new(file);
    write_csv(table, &mut out).with_context(|| format!("failed to write CSV to {}", tp.display()))?;
    let file = out
        .into_inner()
        .map_err(|e| e.into_error())
        .context("failed to flush output")?;
    file.sync_all().context("output sync failed")?;
    Ok(())
}

/// Path for the temp file: appends `.part` to the final path (e.g. `out.csv` → `out.csv.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Keeps the table in memory. Useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub table: Option<Table>,
}

impl TableSink for MemorySink {
    fn write_table(&mut self, table: &Table) -> Result<String> {
        self.table = Some(table.clone());
        Ok("memory".to_string())
    }
}
