//! Stack per-URL tables into one, tagging each row with its source URL.

use super::{Cell, Table};
use std::collections::HashMap;

/// Name of the column holding each row's source URL.
pub const URL_COLUMN: &str = "URL";

/// Concatenates `parts` in the given order.
///
/// Columns are unioned by name in first-seen order; a row gets a missing cell
/// for any column its source table lacks. A final [`URL_COLUMN`] carries the
/// source URL of every row. A `URL` column already present in a source table
/// is replaced. With no parts the result is a header-only table with just
/// [`URL_COLUMN`].
pub fn combine(parts: Vec<(String, Table)>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    for (_, table) in &parts {
        for name in table.columns() {
            if name != URL_COLUMN && !position.contains_key(name) {
                position.insert(name.clone(), columns.len());
                columns.push(name.clone());
            }
        }
    }
    let width = columns.len();
    columns.push(URL_COLUMN.to_string());

    let mut out = Table::new(columns);
    for (url, table) in parts {
        let (src_columns, rows) = table.into_parts();
        // Source column index → combined column index; None for a replaced URL column.
        let targets: Vec<Option<usize>> = src_columns
            .iter()
            .map(|c| position.get(c.as_str()).copied())
            .collect();
        for row in rows {
            let mut merged: Vec<Cell> = vec![None; width + 1];
            for (cell, target) in row.into_iter().zip(&targets) {
                if let Some(i) = target {
                    merged[*i] = cell;
                }
            }
            merged[width] = Some(url.clone());
            out.push_row(merged);
        }
    }
    out
}
