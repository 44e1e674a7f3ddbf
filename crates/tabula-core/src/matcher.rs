#![forbid(unsafe_code)]

//! Row predicates and their combinators.
//!
//! A [`Matcher`] tests one row. Any `Fn(RowRef<'_>) -> bool` closure is a
//! matcher; the builders here cover the common column tests.

use std::collections::HashMap;

use crate::rows::RowRef;

/// Tests a single row of data against a set of criteria.
pub trait Matcher {
    fn matches(&self, row: RowRef<'_>) -> bool;
}

impl<F> Matcher for F
where
    F: for<'a> Fn(RowRef<'a>) -> bool,
{
    fn matches(&self, row: RowRef<'_>) -> bool {
        self(row)
    }
}

/// Adapts a closure into a [`Matcher`].
pub fn from_fn<F>(f: F) -> impl Matcher
where
    F: for<'a> Fn(RowRef<'a>) -> bool,
{
    f
}

/// Matches rows where `test` holds for the named numeric column. Rows
/// where the column is missing or holds text never match.
pub fn number_where<F>(name: impl Into<String>, test: F) -> impl Matcher
where
    F: Fn(f64) -> bool,
{
    let name = name.into();
    from_fn(move |row: RowRef<'_>| row.number(&name).is_some_and(|v| test(v)))
}

/// Matches rows where `test` holds for the named text column. Rows where
/// the column is missing or holds numbers never match.
pub fn text_where<F>(name: impl Into<String>, test: F) -> impl Matcher
where
    F: Fn(&str) -> bool,
{
    let name = name.into();
    from_fn(move |row: RowRef<'_>| row.text(&name).is_some_and(|s| test(s)))
}

/// Matches rows where the named column is zero.
pub fn is_zero(name: impl Into<String>) -> impl Matcher {
    number_where(name, |v| v == 0.0)
}

/// Matches rows where the named column is NaN.
pub fn is_nan(name: impl Into<String>) -> impl Matcher {
    number_where(name, f64::is_nan)
}

/// Matches rows where the named column is infinite, of either sign.
pub fn is_inf(name: impl Into<String>) -> impl Matcher {
    number_where(name, f64::is_infinite)
}

/// Matches rows where the named column is greater than `value`.
pub fn greater_than(name: impl Into<String>, value: f64) -> impl Matcher {
    number_where(name, move |v| v > value)
}

/// Matches rows where the named column is less than `value`.
pub fn less_than(name: impl Into<String>, value: f64) -> impl Matcher {
    number_where(name, move |v| v < value)
}

/// Matches rows where the named column equals `value` within the
/// absolute tolerance `epsilon`.
pub fn nearly_equal(name: impl Into<String>, value: f64, epsilon: f64) -> impl Matcher {
    number_where(name, move |v| v == value || (v - value).abs() <= epsilon)
}

/// Matches rows where the named text column equals `value`.
pub fn text_eq(name: impl Into<String>, value: impl Into<String>) -> impl Matcher {
    let value = value.into();
    text_where(name, move |s| s == value.as_str())
}

/// Inverts a matcher.
pub fn not(matcher: impl Matcher) -> impl Matcher {
    from_fn(move |row: RowRef<'_>| !matcher.matches(row))
}

/// Matches rows where every named text column holds the wanted value.
pub fn all_of(wanted: HashMap<String, String>) -> impl Matcher {
    from_fn(move |row: RowRef<'_>| {
        wanted
            .iter()
            .all(|(name, want)| row.text(name).is_some_and(|have| have == want.as_str()))
    })
}
