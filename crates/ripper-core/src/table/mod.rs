//! In-memory table: named columns and rows of optional text cells.
//!
//! Cells keep the exact text read from the CSV body. An empty field is a
//! missing cell (`None`) and is written back as an empty field.

mod kind;
mod merge;
mod normalize;
mod parse;
mod write;

pub use kind::{infer_kind, ColumnKind};
pub use merge::{combine, URL_COLUMN};
pub use normalize::{normalize_text_columns, title_case};
pub use parse::{parse_lenient, parse_strict, Lenient, ParseError};
pub use write::write_csv;

/// One table cell; `None` is a missing value.
pub type Cell = Option<String>;

/// A rectangular table. Every row has exactly `columns().len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with missing cells and dropping extra cells.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<Cell>] {
        &mut self.rows
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows (a header alone still counts as empty).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |r| r[idx].as_deref())
    }

    /// Cells of the column called `name`, if it exists.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(self.column(idx).collect())
    }

    /// Inferred kind of column `idx`.
    pub fn column_kind(&self, idx: usize) -> ColumnKind {
        infer_kind(self.column(idx))
    }
}
