//! Column-oriented in-memory tables with sorted grouping and aggregation.
//!
//! This crate focuses on:
//! - Typed columns (64-bit float or text) addressed by name, with
//!   add/remove/replace and equal-length enforcement.
//! - A key model: an ordered subset of columns that defines the table's
//!   sort order and the group identity of its rows. Setting a key stably
//!   sorts the table.
//! - Linear-scan grouping over key-sorted rows, driving aggregate-fill
//!   columns and side-effecting per-group callbacks.
//! - Composable row predicates ([`Matcher`]), per-row scalar functions
//!   ([`Calculator`]) and row-group reductions ([`Aggregator`]).
//! - Table algebra: append/union, projection, dedup, row removal.

#![forbid(unsafe_code)]

pub mod agg;
mod algebra;
pub mod calc;
mod column;
mod error;
mod group;
pub mod matcher;
mod rows;
mod table;
mod types;

pub use crate::agg::{Aggregator, Grouper};
pub use crate::calc::Calculator;
pub use crate::error::TableError;
pub use crate::matcher::Matcher;
pub use crate::rows::{FilteredRowGroup, IndexRowGroup, RowGroup, RowMap, RowRef};
pub use crate::table::Table;
pub use crate::types::{ColumnType, Value};
