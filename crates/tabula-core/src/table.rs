#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::column::{Column, ColumnData};
use crate::error::TableError;
use crate::matcher::Matcher;
use crate::rows::{RowMap, RowRef};
use crate::types::{ColumnType, Value};

/// A column-centric table of data. Columns hold either numbers (`f64`) or
/// text (`String`), and every column always has the table's row count.
///
/// An ordered set of key columns can be assigned with [`Table::set_key`].
/// The key defines the table's sort order and the group identity used by
/// the aggregation operations; setting it sorts the table immediately.
///
/// A `Table` is single-threaded. Row handles ([`RowRef`]) and row-group
/// cursors borrow the table, so the borrow checker rules out structural
/// mutation while any of them is live.
#[derive(Debug, Default)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) key: Vec<usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column of numeric data. The column's length must equal the
    /// length of any columns already in the table. If a column named
    /// `name` already exists, its data and type are replaced in place:
    /// the position is unchanged, and so is its key membership.
    pub fn add_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), TableError> {
        self.check_length(values.len())?;
        self.insert_column(name, ColumnData::Number(values));
        Ok(())
    }

    /// Adds a column of text data. Same length and replacement rules as
    /// [`Table::add_column`].
    pub fn add_text_column(&mut self, name: &str, values: Vec<String>) -> Result<(), TableError> {
        self.check_length(values.len())?;
        self.insert_column(name, ColumnData::Text(values));
        Ok(())
    }

    fn check_length(&self, len: usize) -> Result<(), TableError> {
        if !self.columns.is_empty() && len != self.row_count() {
            return Err(TableError::InvalidLength {
                expected: self.row_count(),
                got: len,
            });
        }
        Ok(())
    }

    pub(crate) fn insert_column(&mut self, name: &str, data: ColumnData) {
        if let Some(&c) = self.index.get(name) {
            self.columns[c].data = data;
            return;
        }
        self.index.insert(name.to_owned(), self.columns.len());
        self.columns.push(Column {
            name: name.to_owned(),
            data,
        });
    }

    /// Removes a column of any type. Columns after it shift down one
    /// position; key entries pointing at later columns are renumbered and
    /// an entry for the removed column itself is dropped, preserving the
    /// relative order of the surviving key entries.
    ///
    /// Removing from a table with no columns is a no-op.
    pub fn remove_column(&mut self, name: &str) -> Result<(), TableError> {
        if self.columns.is_empty() {
            return Ok(());
        }
        let c = match self.index.remove(name) {
            Some(c) => c,
            None => return Err(TableError::UnknownColumn(name.to_owned())),
        };
        self.columns.remove(c);
        for (i, col) in self.columns.iter().enumerate().skip(c) {
            self.index.insert(col.name.clone(), i);
        }

        let mut key = Vec::with_capacity(self.key.len());
        for &k in &self.key {
            match k.cmp(&c) {
                Ordering::Less => key.push(k),
                Ordering::Equal => {}
                Ordering::Greater => key.push(k - 1),
            }
        }
        self.key = key;
        Ok(())
    }

    /// The number of rows in the table (0 if there are no columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    /// The number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in the order the columns were added.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Column types, in the order the columns were added.
    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|c| c.data.column_type()).collect()
    }

    /// The type of the named column.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.position(name).map(|c| self.columns[c].data.column_type())
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Zero-copy view of a numeric column's values.
    pub fn numbers(&self, name: &str) -> Option<&[f64]> {
        match &self.columns[self.position(name)?].data {
            ColumnData::Number(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Zero-copy view of a text column's values.
    pub fn texts(&self, name: &str) -> Option<&[String]> {
        match &self.columns[self.position(name)?].data {
            ColumnData::Number(_) => None,
            ColumnData::Text(v) => Some(v),
        }
    }

    /// One row of data, one value per column in column order, or `None`
    /// when `n` is out of range.
    pub fn row(&self, n: usize) -> Option<Vec<Value>> {
        if n >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.data.value(n)).collect())
    }

    /// One row of data keyed by column name, or `None` when `n` is out of
    /// range.
    pub fn row_map(&self, n: usize) -> Option<RowMap> {
        if n >= self.row_count() {
            return None;
        }
        Some(RowMap::new(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.data.value(n)))
                .collect(),
        ))
    }

    /// A borrowed handle to row `n`, or `None` when `n` is out of range.
    pub fn row_ref(&self, n: usize) -> Option<RowRef<'_>> {
        (n < self.row_count()).then(|| RowRef::new(self, n))
    }

    /// Every row in the table. When `headers` is true the first row holds
    /// the column names.
    pub fn raw_rows(&self, headers: bool) -> Vec<Vec<Value>> {
        if self.column_count() == 0 {
            return Vec::new();
        }
        let mut rows = Vec::with_capacity(self.row_count() + usize::from(headers));
        if headers {
            rows.push(
                self.columns
                    .iter()
                    .map(|c| Value::Text(c.name.clone()))
                    .collect(),
            );
        }
        for n in 0..self.row_count() {
            rows.push(self.columns.iter().map(|c| c.data.value(n)).collect());
        }
        rows
    }

    /// Exchanges the data of rows `i` and `j` in every column.
    pub fn swap(&mut self, i: usize, j: usize) {
        for col in &mut self.columns {
            col.data.swap(i, j);
        }
    }

    /// Assigns the named columns, in order, as the table's key and stably
    /// sorts the table by it. Rows with equal keys keep their previous
    /// relative order, which is what lets the grouping operations treat
    /// them as one contiguous run.
    pub fn set_key(&mut self, names: &[&str]) -> Result<(), TableError> {
        let mut key = Vec::with_capacity(names.len());
        for &name in names {
            key.push(
                self.position(name)
                    .ok_or_else(|| TableError::UnknownColumn(name.to_owned()))?,
            );
        }
        self.key = key;
        self.sort_by_key();
        Ok(())
    }

    /// The names of the key columns, in key order.
    pub fn key_names(&self) -> Vec<&str> {
        self.key
            .iter()
            .map(|&k| self.columns[k].name.as_str())
            .collect()
    }

    pub(crate) fn sort_by_key(&mut self) {
        let mut perm: Vec<usize> = (0..self.row_count()).collect();
        perm.sort_by(|&a, &b| self.compare_rows(a, b));
        for col in &mut self.columns {
            col.data = col.data.gather(&perm);
        }
    }

    /// Compares two rows. With a key set, only the key columns are
    /// consulted, in key order; otherwise all columns in insertion order.
    /// The first differing column decides. A NaN cell orders as equal in
    /// both directions, so the stable sort leaves such rows where they
    /// were.
    pub fn compare_rows(&self, i: usize, j: usize) -> Ordering {
        if self.key.is_empty() {
            self.compare_at(0..self.columns.len(), i, j)
        } else {
            self.compare_at(self.key.iter().copied(), i, j)
        }
    }

    /// Natural-order comparison over all columns, ignoring any key.
    pub(crate) fn compare_natural(&self, i: usize, j: usize) -> Ordering {
        self.compare_at(0..self.columns.len(), i, j)
    }

    fn compare_at<I>(&self, cols: I, i: usize, j: usize) -> Ordering
    where
        I: IntoIterator<Item = usize>,
    {
        for c in cols {
            match &self.columns[c].data {
                ColumnData::Number(v) => {
                    let (a, b) = (v[i], v[j]);
                    if a == b {
                        continue;
                    }
                    match a.partial_cmp(&b) {
                        Some(ord) => return ord,
                        None => return Ordering::Equal,
                    }
                }
                ColumnData::Text(v) => match v[i].cmp(&v[j]) {
                    Ordering::Equal => continue,
                    ord => return ord,
                },
            }
        }
        Ordering::Equal
    }

    /// Whether row `i` sorts before row `j` under [`Table::compare_rows`].
    pub fn less(&self, i: usize, j: usize) -> bool {
        self.compare_rows(i, j) == Ordering::Less
    }

    /// Whether rows `i` and `j` hold the same values. With a key set, only
    /// the key columns are compared; otherwise all columns. Two NaN cells
    /// are not equal, matching float equality.
    pub fn equal(&self, i: usize, j: usize) -> bool {
        if self.key.is_empty() {
            self.equal_at(0..self.columns.len(), i, j)
        } else {
            self.equal_at(self.key.iter().copied(), i, j)
        }
    }

    /// Natural equality over all columns, ignoring any key.
    pub(crate) fn equal_natural(&self, i: usize, j: usize) -> bool {
        self.equal_at(0..self.columns.len(), i, j)
    }

    fn equal_at<I>(&self, cols: I, i: usize, j: usize) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        for c in cols {
            match &self.columns[c].data {
                ColumnData::Number(v) => {
                    if v[i] != v[j] {
                        return false;
                    }
                }
                ColumnData::Text(v) => {
                    if v[i] != v[j] {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Overwrites one cell of a numeric column.
    pub fn set_number(&mut self, name: &str, row: usize, value: f64) -> Result<(), TableError> {
        if row >= self.row_count() {
            return Err(TableError::OutOfRange {
                index: row,
                rows: self.row_count(),
            });
        }
        let c = self
            .position(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_owned()))?;
        match &mut self.columns[c].data {
            ColumnData::Number(v) => {
                v[row] = value;
                Ok(())
            }
            ColumnData::Text(_) => Err(TableError::MismatchedColumnTypes(name.to_owned())),
        }
    }

    /// Appends one fully-typed row. Every value's type is checked against
    /// its column before anything is pushed, so a mismatch leaves the
    /// table untouched.
    pub fn append_row(&mut self, row: &[Value]) -> Result<(), TableError> {
        if row.len() != self.column_count() {
            return Err(TableError::WrongColumnCount {
                expected: self.column_count(),
                got: row.len(),
            });
        }
        for (col, value) in self.columns.iter().zip(row) {
            if col.data.column_type() != value.column_type() {
                return Err(TableError::MismatchedColumnTypes(col.name.clone()));
            }
        }
        for (col, value) in self.columns.iter_mut().zip(row) {
            col.data.push(value.clone());
        }
        Ok(())
    }

    /// The positions of every row matched by `matcher`, in ascending
    /// order. This is the index source behind all of the `*_where`
    /// operations.
    pub fn matches(&self, matcher: &dyn Matcher) -> Vec<usize> {
        if self.row_count() == 0 || self.column_count() == 0 {
            return Vec::new();
        }
        let mut rows = Vec::new();
        for n in 0..self.row_count() {
            if matcher.matches(RowRef::new(self, n)) {
                rows.push(n);
            }
        }
        rows
    }

    /// The number of rows matched by `matcher`.
    pub fn count_where(&self, matcher: &dyn Matcher) -> usize {
        if self.row_count() == 0 || self.column_count() == 0 {
            return 0;
        }
        (0..self.row_count())
            .filter(|&n| matcher.matches(RowRef::new(self, n)))
            .count()
    }

    /// Deletes every row matched by `matcher`, preserving the relative
    /// order of the rows that remain.
    pub fn remove_rows(&mut self, matcher: &dyn Matcher) {
        let matched = self.matches(matcher);
        // Walk backwards so earlier positions stay valid while removing.
        for &n in matched.iter().rev() {
            for col in &mut self.columns {
                col.data.remove(n);
            }
        }
    }
}
