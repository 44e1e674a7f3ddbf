#![forbid(unsafe_code)]

//! Per-row scalar calculations.

use crate::rows::RowRef;

/// Computes one numeric value from a single row of data.
pub trait Calculator {
    fn calculate(&self, row: RowRef<'_>) -> f64;
}

impl<F> Calculator for F
where
    F: for<'a> Fn(RowRef<'a>) -> f64,
{
    fn calculate(&self, row: RowRef<'_>) -> f64 {
        self(row)
    }
}

/// Adapts a closure into a [`Calculator`].
pub fn from_fn<F>(f: F) -> impl Calculator
where
    F: for<'a> Fn(RowRef<'a>) -> f64,
{
    f
}

/// A calculator that always returns `value`.
pub fn constant(value: f64) -> impl Calculator {
    from_fn(move |_row: RowRef<'_>| value)
}

/// A calculator that always returns zero.
pub fn zero() -> impl Calculator {
    constant(0.0)
}
