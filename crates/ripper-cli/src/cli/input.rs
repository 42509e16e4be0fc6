//! URL list file reading.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads one URL per line, trimming whitespace and skipping blank lines and
/// lines starting with `#`. Duplicates are kept; the batch runner collapses them.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read URL list {}", path.display()))?;
    Ok(parse_url_list(&data))
}

fn parse_url_list(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
