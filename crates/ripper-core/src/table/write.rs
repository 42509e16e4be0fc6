//! [`Table`] → CSV text.

use super::Table;
use std::io;

/// Writes `table` as CSV with a header row and no index column.
/// Missing cells are written as empty fields.
pub fn write_csv<W: io::Write>(table: &Table, w: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(w);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}
