#![forbid(unsafe_code)]

//! The grouping engine: one linear scan over an ordered index sequence,
//! splitting it into maximal runs of key-equal rows.
//!
//! The scan relies on the table being sorted by its key: any index
//! sequence obtained by filtering the rows while preserving their order
//! (all rows ascending, matcher hits ascending) then keeps each key group
//! contiguous. The `*_index` entry points accept caller-supplied
//! sequences and inherit that contract: an out-of-order sequence
//! produces wrong groupings, not an error.

use std::borrow::Cow;

use crate::agg::{Aggregator, Grouper};
use crate::calc::Calculator;
use crate::column::ColumnData;
use crate::matcher::Matcher;
use crate::rows::{FilteredRowGroup, IndexRowGroup, RowRef};
use crate::table::Table;

impl Table {
    /// Scans `indices` once and invokes `emit` with each maximal run of
    /// key-equal rows. `indices` must not be empty.
    fn each_group<F>(&self, indices: &[usize], mut emit: F)
    where
        F: FnMut(&[usize]),
    {
        let mut group_start = 0;
        for pos in 1..indices.len() {
            if !self.equal(indices[group_start], indices[pos]) {
                emit(&indices[group_start..pos]);
                group_start = pos;
            }
        }
        emit(&indices[group_start..]);
    }

    /// Adds (or replaces) a numeric column `name` holding, for every row,
    /// the aggregator's result for the key group the row belongs to.
    pub fn aggregate(&mut self, name: &str, aggregator: &dyn Aggregator) {
        let seq: Vec<usize> = (0..self.row_count()).collect();
        self.aggregate_index(name, aggregator, &seq);
    }

    /// Like [`Table::aggregate`], restricted to the rows matched by
    /// `matcher`. Unmatched rows get the NaN "no value" sentinel.
    pub fn aggregate_where(
        &mut self,
        name: &str,
        aggregator: &dyn Aggregator,
        matcher: &dyn Matcher,
    ) {
        let indices = self.matches(matcher);
        self.aggregate_index(name, aggregator, &indices);
    }

    /// Like [`Table::aggregate`], restricted to the rows in `indices`
    /// (which must preserve the table's row order; see the module docs).
    /// Rows absent from `indices` get the NaN "no value" sentinel. The
    /// column is created even when `indices` is empty.
    pub fn aggregate_index(&mut self, name: &str, aggregator: &dyn Aggregator, indices: &[usize]) {
        let mut column = vec![f64::NAN; self.row_count()];
        self.aggregate_index_fill(&mut column, aggregator, indices);
        self.insert_column(name, ColumnData::Number(column));
    }

    /// Fills `column` with per-group aggregates for the rows in `indices`,
    /// leaving other slots untouched. `column` must be exactly as long as
    /// the table; mismatched lengths and degenerate tables are no-ops.
    pub fn aggregate_index_fill(
        &self,
        column: &mut [f64],
        aggregator: &dyn Aggregator,
        indices: &[usize],
    ) {
        if self.row_count() == 0
            || self.column_count() == 0
            || indices.is_empty()
            || column.len() != self.row_count()
        {
            return;
        }
        self.each_group(indices, |group| {
            let mut rows = IndexRowGroup::new(self, Cow::Borrowed(group));
            let value = aggregator.aggregate(&mut rows);
            for &n in group {
                column[n] = value;
            }
        });
    }

    /// Adds (or replaces) a numeric column `name` computed independently
    /// per row by `calculator`, in the table's current row order.
    pub fn calc(&mut self, name: &str, calculator: &dyn Calculator) {
        let seq: Vec<usize> = (0..self.row_count()).collect();
        self.calc_index(name, calculator, &seq);
    }

    /// Like [`Table::calc`], restricted to the rows matched by `matcher`.
    /// Unmatched rows get the NaN "no value" sentinel.
    pub fn calc_where(&mut self, name: &str, calculator: &dyn Calculator, matcher: &dyn Matcher) {
        let indices = self.matches(matcher);
        self.calc_index(name, calculator, &indices);
    }

    /// Like [`Table::calc`], restricted to the rows in `indices`. Rows
    /// absent from `indices` get the NaN "no value" sentinel. The column
    /// is created even when `indices` is empty.
    pub fn calc_index(&mut self, name: &str, calculator: &dyn Calculator, indices: &[usize]) {
        let mut column = vec![f64::NAN; self.row_count()];
        self.calc_index_fill(&mut column, calculator, indices);
        self.insert_column(name, ColumnData::Number(column));
    }

    /// Fills `column` at each position in `indices` with the calculator's
    /// result for that row. `column` must be exactly as long as the
    /// table; mismatched lengths and degenerate tables are no-ops.
    pub fn calc_index_fill(
        &self,
        column: &mut [f64],
        calculator: &dyn Calculator,
        indices: &[usize],
    ) {
        if self.row_count() == 0
            || self.column_count() == 0
            || indices.is_empty()
            || column.len() != self.row_count()
        {
            return;
        }
        for &n in indices {
            column[n] = calculator.calculate(RowRef::new(self, n));
        }
    }

    /// Invokes `grouper` once per key group over the whole table, in the
    /// table's current row order.
    pub fn apply(&self, grouper: &mut dyn Grouper) {
        let seq: Vec<usize> = (0..self.row_count()).collect();
        self.apply_index(grouper, &seq);
    }

    /// Invokes `grouper` once per key group, lending it a lazily-filtered
    /// view of the group's rows. Group boundaries are detected over all
    /// rows, so a group none of whose rows match still invokes `grouper`
    /// with an empty view.
    pub fn apply_where(&self, grouper: &mut dyn Grouper, matcher: &dyn Matcher) {
        if self.row_count() == 0 || self.column_count() == 0 {
            return;
        }
        let mut group_start = 0;
        for row in 1..self.row_count() {
            if !self.equal(group_start, row) {
                let mut rows = FilteredRowGroup::new(self, matcher, group_start, row - group_start);
                grouper.group(&mut rows);
                group_start = row;
            }
        }
        let mut rows =
            FilteredRowGroup::new(self, matcher, group_start, self.row_count() - group_start);
        grouper.group(&mut rows);
    }

    /// Invokes `grouper` once per key group among the rows in `indices`
    /// (which must preserve the table's row order; see the module docs).
    pub fn apply_index(&self, grouper: &mut dyn Grouper, indices: &[usize]) {
        if self.row_count() == 0 || self.column_count() == 0 || indices.is_empty() {
            return;
        }
        self.each_group(indices, |group| {
            let mut rows = IndexRowGroup::new(self, Cow::Borrowed(group));
            grouper.group(&mut rows);
        });
    }

    /// Reduces the whole table to one value with `aggregator`, ignoring
    /// any key.
    pub fn reduce(&self, aggregator: &dyn Aggregator) -> f64 {
        let mut rows = self.rows();
        aggregator.aggregate(&mut rows)
    }

    /// A row group over every row of the table, in order.
    pub fn rows(&self) -> IndexRowGroup<'_> {
        IndexRowGroup::new(self, Cow::Owned((0..self.row_count()).collect()))
    }

    /// A row group lazily yielding the rows matched by `matcher`, in
    /// order.
    pub fn rows_where<'a>(&'a self, matcher: &'a dyn Matcher) -> FilteredRowGroup<'a> {
        FilteredRowGroup::new(self, matcher, 0, self.row_count())
    }
}
