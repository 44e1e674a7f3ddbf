#![forbid(unsafe_code)]

use std::io::Write;

use tabula_core::Table;

/// Writes `table` as CSV: one header row of column names followed by one
/// record per row, values in column order.
///
/// Numeric cells use Rust's default float formatting (`5` for 5.0, `NaN`,
/// `inf`). Fields containing a comma, quote or newline are quoted by the
/// writer. Write failures propagate to the caller.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for row in table.raw_rows(true) {
        out.write_record(row.iter().map(|value| value.to_string()))?;
    }
    out.flush()?;
    Ok(())
}
