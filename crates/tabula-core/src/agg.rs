#![forbid(unsafe_code)]

//! Row-group reductions and the per-group callback trait.
//!
//! Aggregators read missing or text cells as 0.0, so reductions over the
//! wrong column name degrade to zeros rather than failing; matchers are
//! the place to pre-filter if that matters.

use crate::rows::RowGroup;

/// Reduces a group of rows to a single numeric value.
///
/// The aggregator drives the group's cursor itself, from its current
/// position to exhaustion, and may rewind with [`RowGroup::reset`] to
/// make further passes, as [`variance`] does.
pub trait Aggregator {
    fn aggregate(&self, rows: &mut dyn RowGroup) -> f64;
}

impl<F> Aggregator for F
where
    F: Fn(&mut dyn RowGroup) -> f64,
{
    fn aggregate(&self, rows: &mut dyn RowGroup) -> f64 {
        self(rows)
    }
}

/// Adapts a closure into an [`Aggregator`].
pub fn from_fn<F>(f: F) -> impl Aggregator
where
    F: Fn(&mut dyn RowGroup) -> f64,
{
    f
}

/// A side-effecting action applied to each group of rows.
pub trait Grouper {
    fn group(&mut self, rows: &mut dyn RowGroup);
}

impl<F> Grouper for F
where
    F: FnMut(&mut dyn RowGroup),
{
    fn group(&mut self, rows: &mut dyn RowGroup) {
        self(rows)
    }
}

/// Counts the rows in a group.
pub fn count() -> impl Aggregator {
    from_fn(|rows: &mut dyn RowGroup| {
        let mut n = 0_usize;
        while rows.next() {
            n += 1;
        }
        n as f64
    })
}

/// Sums the named numeric column over a group.
pub fn sum(name: impl Into<String>) -> impl Aggregator {
    let name = name.into();
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut total = 0.0;
        while rows.next() {
            total += rows.number(&name).unwrap_or(0.0);
        }
        total
    })
}

/// The arithmetic mean of the named column over a group.
pub fn mean(name: impl Into<String>) -> impl Aggregator {
    let name = name.into();
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut total = 0.0;
        let mut n = 0_usize;
        while rows.next() {
            total += rows.number(&name).unwrap_or(0.0);
            n += 1;
        }
        total / n as f64
    })
}

/// The maximum of the named column over a group.
///
/// The running extremum is seeded at 0.0, so a group whose values are all
/// negative reports 0.
pub fn max(name: impl Into<String>) -> impl Aggregator {
    let name = name.into();
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut extreme = 0.0;
        while rows.next() {
            let v = rows.number(&name).unwrap_or(0.0);
            if v > extreme {
                extreme = v;
            }
        }
        extreme
    })
}

/// The minimum of the named column over a group.
///
/// The running extremum is seeded at 0.0, so a group whose values are all
/// positive reports 0.
pub fn min(name: impl Into<String>) -> impl Aggregator {
    let name = name.into();
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut extreme = 0.0;
        while rows.next() {
            let v = rows.number(&name).unwrap_or(0.0);
            if v < extreme {
                extreme = v;
            }
        }
        extreme
    })
}

/// The sample variance of the named column over a group, by the corrected
/// two-pass algorithm (Chan, Golub and LeVeque, eq. 1.7).
///
/// A single-row group has no sample variance and yields NaN.
pub fn variance(name: impl Into<String>) -> impl Aggregator {
    let name = name.into();
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut total = 0.0;
        let mut n = 0_usize;
        while rows.next() {
            total += rows.number(&name).unwrap_or(0.0);
            n += 1;
        }
        let mean = total / n as f64;

        let mut sq_dev = 0.0;
        // The raw deviations should sum to ~0; their residual corrects
        // accumulated floating error.
        let mut compensation = 0.0;
        rows.reset();
        while rows.next() {
            let d = rows.number(&name).unwrap_or(0.0) - mean;
            sq_dev += d * d;
            compensation += d;
        }
        (sq_dev - compensation * compensation / n as f64) / (n as f64 - 1.0)
    })
}

/// The ratio of the sums of two columns over a group.
pub fn ratio_of_sums(a: impl Into<String>, b: impl Into<String>) -> impl Aggregator {
    let (a, b) = (a.into(), b.into());
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut sum_a = 0.0;
        let mut sum_b = 0.0;
        while rows.next() {
            sum_a += rows.number(&a).unwrap_or(0.0);
            sum_b += rows.number(&b).unwrap_or(0.0);
        }
        sum_a / sum_b
    })
}

/// The difference of the sums of two columns over a group.
pub fn difference_of_sums(a: impl Into<String>, b: impl Into<String>) -> impl Aggregator {
    let (a, b) = (a.into(), b.into());
    from_fn(move |rows: &mut dyn RowGroup| {
        let mut sum_a = 0.0;
        let mut sum_b = 0.0;
        while rows.next() {
            sum_a += rows.number(&a).unwrap_or(0.0);
            sum_b += rows.number(&b).unwrap_or(0.0);
        }
        sum_a - sum_b
    })
}
