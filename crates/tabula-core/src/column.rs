#![forbid(unsafe_code)]

use crate::types::{ColumnType, Value};

/// Column storage. A column holds numbers or text, never both.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ColumnData {
    Number(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Number(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Number(_) => ColumnType::Number,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    /// The cell at `row`. Callers have already bounds-checked `row`.
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Number(v) => Value::Number(v[row]),
            ColumnData::Text(v) => Value::Text(v[row].clone()),
        }
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        match self {
            ColumnData::Number(v) => v.swap(i, j),
            ColumnData::Text(v) => v.swap(i, j),
        }
    }

    pub fn remove(&mut self, row: usize) {
        match self {
            ColumnData::Number(v) => {
                v.remove(row);
            }
            ColumnData::Text(v) => {
                v.remove(row);
            }
        }
    }

    /// Appends a value of the matching type. Callers have already
    /// type-checked `value` against this column.
    pub fn push(&mut self, value: Value) {
        match (self, value) {
            (ColumnData::Number(v), Value::Number(x)) => v.push(x),
            (ColumnData::Text(v), Value::Text(s)) => v.push(s),
            _ => debug_assert!(false, "push after failed type check"),
        }
    }

    /// Appends every value from `other`, which has the same type.
    pub fn extend_from(&mut self, other: &ColumnData) {
        match (self, other) {
            (ColumnData::Number(v), ColumnData::Number(o)) => v.extend_from_slice(o),
            (ColumnData::Text(v), ColumnData::Text(o)) => v.extend_from_slice(o),
            _ => debug_assert!(false, "extend after failed type check"),
        }
    }

    /// Appends `n` "no value" cells: NaN for numbers, the empty string for text.
    pub fn pad(&mut self, n: usize) {
        match self {
            ColumnData::Number(v) => v.extend(std::iter::repeat(f64::NAN).take(n)),
            ColumnData::Text(v) => v.extend(std::iter::repeat(String::new()).take(n)),
        }
    }

    /// A new column holding `self[indices[0]], self[indices[1]], ...`.
    pub fn gather(&self, indices: &[usize]) -> ColumnData {
        match self {
            ColumnData::Number(v) => {
                ColumnData::Number(indices.iter().map(|&n| v[n]).collect())
            }
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&n| v[n].clone()).collect())
            }
        }
    }

    /// A zero-length column of the same type.
    pub fn empty_like(&self) -> ColumnData {
        match self {
            ColumnData::Number(_) => ColumnData::Number(Vec::new()),
            ColumnData::Text(_) => ColumnData::Text(Vec::new()),
        }
    }
}

/// A named column of table data.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Column {
    pub name: String,
    pub data: ColumnData,
}
