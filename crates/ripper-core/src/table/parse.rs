//! CSV body → [`Table`], in strict and lenient modes.
//!
//! Both modes treat the first record as the header and pad short rows with
//! missing cells. Strict mode fails on the first record with more fields than
//! the header, on a quoted field that is never closed, or on any record the
//! reader rejects; lenient mode skips those records and keeps going.
//!
//! Empty fields and the usual missing-value markers (`NA`, `NULL`, `N/A`,
//! `NaN`, ...) become missing cells.

use super::{Cell, Table};
use csv::{ReaderBuilder, StringRecord};
use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::Range;
use thiserror::Error;

/// Why a CSV body could not be turned into a table.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Body holds no header record.
    #[error("no columns to parse from body")]
    NoHeader,
    /// A data row is wider than the header.
    #[error("line {line}: expected {expected} fields, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
    /// A quoted field opened on `line` runs to the end of the body.
    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: u64 },
    /// The CSV reader rejected a record (e.g. invalid UTF-8 inside a field).
    #[error("line {line}: {source}")]
    Record {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Result of a lenient parse.
#[derive(Debug)]
pub struct Lenient {
    pub table: Table,
    /// Records dropped because they were malformed.
    pub skipped: usize,
}

/// Parses `text`, failing on the first malformed record.
pub fn parse_strict(text: &str) -> Result<Table, ParseError> {
    parse(text, false).map(|l| l.table)
}

/// Parses `text`, skipping malformed records. Fails only when there is no header.
pub fn parse_lenient(text: &str) -> Result<Lenient, ParseError> {
    parse(text, true)
}

/// Tokens read as missing values, besides the empty field.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse(text: &str, lenient: bool) -> Result<Lenient, ParseError> {
    let mut skipped = 0usize;
    let mut body = Cow::Borrowed(text);
    while let Some(open) = unterminated_quote(&body) {
        let line = body[..open.start].matches('\n').count() as u64 + 1;
        if !lenient {
            return Err(ParseError::UnterminatedQuote { line });
        }
        tracing::debug!(line, "skipping line with unclosed quote");
        skipped += 1;
        body.to_mut().replace_range(open, "");
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = rdr.records();
    let header = match records.next() {
        None => return Err(ParseError::NoHeader),
        Some(Err(e)) => {
            return Err(ParseError::Record {
                line: error_line(&e),
                source: e,
            })
        }
        Some(Ok(h)) => h,
    };

    let mut table = Table::new(header_names(&header));
    let width = table.columns().len();

    for result in records {
        let record = match result {
            Ok(r) => r,
            Err(e) if lenient => {
                tracing::debug!("skipping bad record: {}", e);
                skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(ParseError::Record {
                    line: error_line(&e),
                    source: e,
                })
            }
        };

        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if lenient {
                tracing::debug!(line, found = record.len(), expected = width, "skipping wide row");
                skipped += 1;
                continue;
            }
            return Err(ParseError::TooManyFields {
                line,
                expected: width,
                found: record.len(),
            });
        }

        table.push_row(record.iter().map(to_cell).collect());
    }

    Ok(Lenient { table, skipped })
}

fn to_cell(field: &str) -> Cell {
    if field.is_empty() || NA_TOKENS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

fn error_line(e: &csv::Error) -> u64 {
    e.position().map(|p| p.line()).unwrap_or(0)
}

/// Finds a quoted field still open at the end of `text` and returns the byte
/// range of the physical line where its record starts, newline included.
///
/// A quote only opens a field when it is the field's first character; inside
/// a quoted field `""` is an escaped quote. This matches how the csv reader
/// splits records, which itself accepts an open quote at EOF silently.
fn unterminated_quote(text: &str) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let mut record_start = 0;
    let mut field_start = true;
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 2;
                    continue;
                }
                in_quotes = false;
            }
        } else {
            match b {
                b'"' if field_start => {
                    in_quotes = true;
                    field_start = false;
                }
                b',' => field_start = true,
                b'\n' | b'\r' => {
                    field_start = true;
                    record_start = i + 1;
                }
                _ => field_start = false,
            }
        }
        i += 1;
    }
    if !in_quotes {
        return None;
    }
    let end = text[record_start..]
        .find('\n')
        .map(|n| record_start + n + 1)
        .unwrap_or(text.len());
    Some(record_start..end)
}

/// Column names from the header record: blanks become `Unnamed: <i>` and
/// repeated names get `.1`, `.2`, ... suffixes so every name is unique.
fn header_names(header: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(header.len());
    for (i, raw) in header.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            raw.to_string()
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}
