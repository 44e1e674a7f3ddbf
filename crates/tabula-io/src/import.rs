#![forbid(unsafe_code)]

use std::io::Read;

use tabula_core::{ColumnType, Table, TableError, Value};
use thiserror::Error;

/// Errors from parsing one row of text fields against a table's columns.
#[derive(Debug, Error)]
pub enum RowParseError {
    /// A field for a numeric column did not parse as a number.
    #[error("column {column}: {reason}")]
    Parse { column: usize, reason: String },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors from reading a whole CSV stream into a table.
#[derive(Debug, Error)]
pub enum CsvReadError {
    #[error("csv input was empty")]
    EmptyInput,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Parses one row of raw text fields and appends it to `table`.
///
/// Each field is interpreted according to the existing type of its column
/// position: numeric columns parse the field as `f64`, text columns take
/// the field verbatim. Every field is parsed before anything is appended,
/// so a failed row leaves the table unchanged. Numeric parse failures
/// carry the position of the offending column.
pub fn parse_row(table: &mut Table, fields: &[&str]) -> Result<(), RowParseError> {
    if fields.len() != table.column_count() {
        return Err(TableError::WrongColumnCount {
            expected: table.column_count(),
            got: fields.len(),
        }
        .into());
    }

    let types = table.column_types();
    let mut row = Vec::with_capacity(fields.len());
    for (column, (&field, column_type)) in fields.iter().zip(types).enumerate() {
        match column_type {
            ColumnType::Number => match field.parse::<f64>() {
                Ok(v) => row.push(Value::Number(v)),
                Err(err) => {
                    return Err(RowParseError::Parse {
                        column,
                        reason: err.to_string(),
                    })
                }
            },
            ColumnType::Text => row.push(Value::Text(field.to_owned())),
        }
    }

    table.append_row(&row)?;
    Ok(())
}

/// Reads an entire CSV stream into a new table.
///
/// The first record is the header. A column becomes numeric when every
/// one of its fields parses as `f64`; otherwise it is text. The returned
/// table has no key set.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, CsvReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    let Some((header, data)) = records.split_first() else {
        return Err(CsvReadError::EmptyInput);
    };

    let mut table = Table::new();
    for (column, name) in header.iter().enumerate() {
        let mut numbers = Vec::with_capacity(data.len());
        for record in data {
            let field = record.get(column).unwrap_or("");
            match field.parse::<f64>() {
                Ok(v) => numbers.push(v),
                Err(_) => break,
            }
        }

        if numbers.len() == data.len() {
            table.add_column(name, numbers)?;
        } else {
            let texts = data
                .iter()
                .map(|record| record.get(column).unwrap_or("").to_owned())
                .collect();
            table.add_text_column(name, texts)?;
        }
    }
    Ok(table)
}
