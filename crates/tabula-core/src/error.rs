#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors produced by table mutations and lookups.
///
/// All variants are recoverable input-validation failures; the table
/// remains usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column length {got} does not match the table row count {expected}")]
    InvalidLength { expected: usize, got: usize },
    #[error("mismatched column types for column '{0}'")]
    MismatchedColumnTypes(String),
    #[error("wrong number of values: got {got}, the table has {expected} columns")]
    WrongColumnCount { expected: usize, got: usize },
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("row index {index} is out of range for a table of {rows} rows")]
    OutOfRange { index: usize, rows: usize },
}
