#![forbid(unsafe_code)]

use crate::column::ColumnData;
use crate::error::TableError;
use crate::matcher::Matcher;
use crate::table::Table;

impl Table {
    /// Appends the rows of `other`, as a column-wise union.
    ///
    /// A column present in both tables concatenates `other`'s values after
    /// this table's. A column only in `other` is created here, pre-padded
    /// with "no value" (NaN / empty text) for the existing rows. A column
    /// only in this table is padded with "no value" for the appended rows.
    ///
    /// Shared-name type conflicts fail with `MismatchedColumnTypes`; the
    /// check runs before any column is touched, so a failed append leaves
    /// the table unchanged. If a key is set, the table is stably re-sorted
    /// after the union.
    pub fn append(&mut self, other: &Table) -> Result<(), TableError> {
        for col in &other.columns {
            if let Some(c) = self.position(&col.name) {
                if self.columns[c].data.column_type() != col.data.column_type() {
                    return Err(TableError::MismatchedColumnTypes(col.name.clone()));
                }
            }
        }

        let own_rows = self.row_count();
        let appended_rows = other.row_count();

        for col in &other.columns {
            match self.position(&col.name) {
                Some(c) => self.columns[c].data.extend_from(&col.data),
                None => {
                    let mut data = col.data.empty_like();
                    data.pad(own_rows);
                    data.extend_from(&col.data);
                    self.insert_column(&col.name, data);
                }
            }
        }

        for col in &mut self.columns {
            if other.position(&col.name).is_none() {
                col.data.pad(appended_rows);
            }
        }

        if !self.key.is_empty() {
            self.sort_by_key();
        }
        Ok(())
    }

    /// A new keyless table holding deep copies of the named columns, in
    /// the order given.
    pub fn select(&self, names: &[&str]) -> Result<Table, TableError> {
        let mut out = Table::new();
        for &name in names {
            let c = self
                .position(name)
                .ok_or_else(|| TableError::UnknownColumn(name.to_owned()))?;
            out.insert_column(name, self.columns[c].data.clone());
        }
        Ok(out)
    }

    /// [`Table::select`] restricted to the rows matched by `matcher`.
    pub fn select_where(&self, names: &[&str], matcher: &dyn Matcher) -> Result<Table, TableError> {
        self.select_index(names, &self.matches(matcher))
    }

    /// [`Table::select`] restricted to the rows in `indices`, in that
    /// order.
    pub fn select_index(&self, names: &[&str], indices: &[usize]) -> Result<Table, TableError> {
        let mut out = Table::new();
        for &name in names {
            let c = self
                .position(name)
                .ok_or_else(|| TableError::UnknownColumn(name.to_owned()))?;
            out.insert_column(name, self.columns[c].data.gather(indices));
        }
        Ok(out)
    }

    /// A new keyless table holding one row per distinct row tuple, in
    /// natural (all-column) sort order. The table itself is not touched:
    /// the natural sort happens on a scratch permutation, so the current
    /// key and row order survive.
    ///
    /// A table with no rows yields an empty table with no columns.
    pub fn unique(&self) -> Table {
        let mut out = Table::new();
        if self.row_count() == 0 {
            return out;
        }

        let mut perm: Vec<usize> = (0..self.row_count()).collect();
        perm.sort_by(|&a, &b| self.compare_natural(a, b));

        let mut kept: Vec<usize> = vec![perm[0]];
        for pair in perm.windows(2) {
            if !self.equal_natural(pair[0], pair[1]) {
                kept.push(pair[1]);
            }
        }

        for col in &self.columns {
            out.insert_column(&col.name, col.data.gather(&kept));
        }
        out
    }

    /// A deep copy of every column, with no key set.
    pub fn cloned(&self) -> Table {
        let mut out = Table::new();
        for col in &self.columns {
            out.insert_column(&col.name, col.data.clone());
        }
        out
    }

    /// A table with the same columns and types but no rows and no key.
    pub fn clone_empty(&self) -> Table {
        let mut out = Table::new();
        for col in &self.columns {
            out.insert_column(&col.name, col.data.empty_like());
        }
        out
    }
}
