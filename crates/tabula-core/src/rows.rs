#![forbid(unsafe_code)]

use std::borrow::Cow;
use std::collections::HashMap;

use crate::column::ColumnData;
use crate::matcher::Matcher;
use crate::table::Table;
use crate::types::Value;

/// A lightweight, non-owning handle to one row of a [`Table`].
///
/// The handle borrows the table, so it cannot outlive a structural
/// mutation (column add/remove, sort, row removal).
#[derive(Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowRef<'a> {
    pub(crate) fn new(table: &'a Table, index: usize) -> Self {
        Self { table, index }
    }

    /// The row's position in the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell in the named column, whatever its type.
    pub fn value(&self, name: &str) -> Option<Value> {
        let c = self.table.position(name)?;
        Some(self.table.columns[c].data.value(self.index))
    }

    /// The cell in the named column, or `None` if the column is missing
    /// or holds text.
    pub fn number(&self, name: &str) -> Option<f64> {
        match &self.table.columns[self.table.position(name)?].data {
            ColumnData::Number(v) => Some(v[self.index]),
            ColumnData::Text(_) => None,
        }
    }

    /// The cell in the named column, or `None` if the column is missing
    /// or holds numbers.
    pub fn text(&self, name: &str) -> Option<&'a str> {
        match &self.table.columns[self.table.position(name)?].data {
            ColumnData::Number(_) => None,
            ColumnData::Text(v) => Some(&v[self.index]),
        }
    }
}

/// A cursor over an ordered subset of a table's rows.
///
/// A group starts in a before-first state; call [`RowGroup::next`] to
/// step onto the first row. The typed accessors read the current row and
/// return `None` while the cursor is before the first row.
///
/// Aggregators may make several passes over a group by calling
/// [`RowGroup::reset`].
pub trait RowGroup {
    /// Rewinds the cursor to its before-first state.
    fn reset(&mut self);

    /// Steps to the next row, returning `false` once the group is
    /// exhausted.
    fn next(&mut self) -> bool;

    /// The table position of the current row.
    fn row_index(&self) -> Option<usize>;

    /// The current row's cell in the named column.
    fn value(&self, name: &str) -> Option<Value>;

    /// The current row's cell in the named column, numeric columns only.
    fn number(&self, name: &str) -> Option<f64>;

    /// The current row's cell in the named column, text columns only.
    fn text(&self, name: &str) -> Option<&str>;
}

/// A row group over a materialized list of row positions.
pub struct IndexRowGroup<'a> {
    table: &'a Table,
    indices: Cow<'a, [usize]>,
    /// One past the cursor position; 0 is the before-first state.
    offset: usize,
}

impl<'a> IndexRowGroup<'a> {
    pub(crate) fn new(table: &'a Table, indices: Cow<'a, [usize]>) -> Self {
        Self {
            table,
            indices,
            offset: 0,
        }
    }

    /// The number of rows in the group.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Filters this group through `matcher`, returning a new group over
    /// the rows that matched. `self`'s cursor is unaffected.
    pub fn where_matches(&self, matcher: &dyn Matcher) -> IndexRowGroup<'a> {
        let matched: Vec<usize> = self
            .indices
            .iter()
            .copied()
            .filter(|&n| matcher.matches(RowRef::new(self.table, n)))
            .collect();
        IndexRowGroup::new(self.table, Cow::Owned(matched))
    }

    fn current(&self) -> Option<usize> {
        self.indices.get(self.offset.checked_sub(1)?).copied()
    }
}

impl RowGroup for IndexRowGroup<'_> {
    fn reset(&mut self) {
        self.offset = 0;
    }

    fn next(&mut self) -> bool {
        if self.offset < self.indices.len() {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    fn row_index(&self) -> Option<usize> {
        self.current()
    }

    fn value(&self, name: &str) -> Option<Value> {
        RowRef::new(self.table, self.current()?).value(name)
    }

    fn number(&self, name: &str) -> Option<f64> {
        RowRef::new(self.table, self.current()?).number(name)
    }

    fn text(&self, name: &str) -> Option<&str> {
        let n = self.current()?;
        RowRef::new(self.table, n).text(name)
    }
}

/// A row group over the contiguous range `[start, start + len)`,
/// lazily yielding only the rows a matcher accepts.
pub struct FilteredRowGroup<'a> {
    table: &'a Table,
    matcher: &'a dyn Matcher,
    start: usize,
    len: usize,
    /// The next row position to test.
    next: usize,
    current: Option<usize>,
}

impl<'a> FilteredRowGroup<'a> {
    pub(crate) fn new(
        table: &'a Table,
        matcher: &'a dyn Matcher,
        start: usize,
        len: usize,
    ) -> Self {
        Self {
            table,
            matcher,
            start,
            len,
            next: start,
            current: None,
        }
    }
}

impl RowGroup for FilteredRowGroup<'_> {
    fn reset(&mut self) {
        self.next = self.start;
        self.current = None;
    }

    fn next(&mut self) -> bool {
        let end = (self.start + self.len).min(self.table.row_count());
        while self.next < end {
            let n = self.next;
            self.next += 1;
            if self.matcher.matches(RowRef::new(self.table, n)) {
                self.current = Some(n);
                return true;
            }
        }
        self.current = None;
        false
    }

    fn row_index(&self) -> Option<usize> {
        self.current
    }

    fn value(&self, name: &str) -> Option<Value> {
        RowRef::new(self.table, self.current?).value(name)
    }

    fn number(&self, name: &str) -> Option<f64> {
        RowRef::new(self.table, self.current?).number(name)
    }

    fn text(&self, name: &str) -> Option<&str> {
        let n = self.current?;
        RowRef::new(self.table, n).text(name)
    }
}

/// One row materialized as a name-to-value map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowMap {
    values: HashMap<String, Value>,
}

impl RowMap {
    pub(crate) fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name)?.as_number()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name)?.as_text()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
