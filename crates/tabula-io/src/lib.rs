//! Text-format boundaries for `tabula-core` tables.
//!
//! This crate keeps the engine free of formatting concerns:
//! - CSV export through the `csv` crate (standard field quoting rules).
//! - Best-effort ingestion of one row of raw text fields, parsed against
//!   the table's existing column types.
//! - A whole-stream CSV reader that builds a table, detecting numeric vs
//!   text per column.

#![forbid(unsafe_code)]

mod export;
mod import;

pub use crate::export::write_csv;
pub use crate::import::{parse_row, read_csv, CsvReadError, RowParseError};
