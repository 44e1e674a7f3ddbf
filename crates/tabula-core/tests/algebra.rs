use pretty_assertions::assert_eq;
use tabula_core::{matcher, RowRef, Table, TableError, Value};

fn floats_equivalent(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
}

fn assert_column(table: &Table, name: &str, expected: &[f64]) {
    let actual = table.numbers(name).unwrap();
    assert!(
        floats_equivalent(actual, expected),
        "column {name}: got {actual:?}, wanted {expected:?}"
    );
}

#[test]
fn append_with_shared_columns_and_no_key_concatenates() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 3.0]).unwrap();
    table.add_column("test2", vec![8.0, 9.0, 10.0]).unwrap();

    let mut other = Table::new();
    other.add_column("test", vec![2.0, 1.0]).unwrap();
    other.add_column("test2", vec![9.0, 8.0]).unwrap();

    table.append(&other).unwrap();
    assert_eq!(table.row_count(), 5);
    assert_column(&table, "test", &[5.0, 4.0, 3.0, 2.0, 1.0]);
    assert_column(&table, "test2", &[8.0, 9.0, 10.0, 9.0, 8.0]);
}

#[test]
fn append_pads_unshared_columns_with_no_value() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 3.0]).unwrap();
    table.add_column("test2", vec![8.0, 9.0, 10.0]).unwrap();

    let mut other = Table::new();
    other.add_column("test", vec![2.0, 1.0]).unwrap();
    other.add_column("test3", vec![9.0, 8.0]).unwrap();

    table.append(&other).unwrap();
    let nan = f64::NAN;
    assert_column(&table, "test", &[5.0, 4.0, 3.0, 2.0, 1.0]);
    assert_column(&table, "test2", &[8.0, 9.0, 10.0, nan, nan]);
    assert_column(&table, "test3", &[nan, nan, nan, 9.0, 8.0]);
}

#[test]
fn append_pads_text_columns_with_empty_strings() {
    let mut table = Table::new();
    table.add_column("n", vec![1.0]).unwrap();
    table
        .add_text_column("s", vec!["a".to_owned()])
        .unwrap();

    let mut other = Table::new();
    other.add_column("n", vec![2.0]).unwrap();

    table.append(&other).unwrap();
    assert_eq!(
        table.texts("s").unwrap(),
        &["a".to_owned(), String::new()]
    );
}

#[test]
fn append_resorts_when_a_key_is_set() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 3.0]).unwrap();
    table.add_column("test2", vec![8.0, 9.0, 10.0]).unwrap();
    table.set_key(&["test2"]).unwrap();

    let mut other = Table::new();
    other.add_column("test", vec![2.0, 1.0]).unwrap();
    other.add_column("test2", vec![9.0, 8.0]).unwrap();

    table.append(&other).unwrap();
    assert_column(&table, "test", &[5.0, 1.0, 4.0, 2.0, 3.0]);
    assert_column(&table, "test2", &[8.0, 8.0, 9.0, 9.0, 10.0]);
}

#[test]
fn append_type_mismatch_is_atomic() {
    let mut table = Table::new();
    table.add_column("n", vec![1.0, 2.0]).unwrap();
    table.add_column("m", vec![3.0, 4.0]).unwrap();

    let mut other = Table::new();
    other.add_column("m", vec![5.0]).unwrap();
    other
        .add_text_column("n", vec!["oops".to_owned()])
        .unwrap();

    let err = table.append(&other).unwrap_err();
    assert_eq!(err, TableError::MismatchedColumnTypes("n".to_owned()));
    // Nothing was mutated, not even the compatible column.
    assert_eq!(table.row_count(), 2);
    assert_column(&table, "n", &[1.0, 2.0]);
    assert_column(&table, "m", &[3.0, 4.0]);
}

#[test]
fn select_copies_named_columns_in_order() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 3.0]).unwrap();
    table.add_column("test2", vec![8.0, 9.0, 10.0]).unwrap();
    table
        .add_text_column("label", vec!["a".into(), "b".into(), "c".into()])
        .unwrap();

    let picked = table.select(&["label", "test"]).unwrap();
    assert_eq!(picked.column_names(), vec!["label", "test"]);
    assert_eq!(
        picked.texts("label").unwrap(),
        &["a".to_owned(), "b".to_owned(), "c".to_owned()]
    );
    assert_column(&picked, "test", &[5.0, 4.0, 3.0]);
    assert_eq!(picked.key_names(), Vec::<&str>::new());
}

#[test]
fn select_unknown_column_fails() {
    let mut table = Table::new();
    table.add_column("test", vec![1.0]).unwrap();
    assert_eq!(
        table.select(&["nope"]).unwrap_err(),
        TableError::UnknownColumn("nope".to_owned())
    );
}

#[test]
fn select_where_keeps_matching_rows_only() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 3.0]).unwrap();
    table.add_column("test2", vec![8.0, 9.0, 10.0]).unwrap();
    table
        .add_text_column("label", vec!["a".into(), "b".into(), "c".into()])
        .unwrap();

    let m = matcher::from_fn(|row: RowRef<'_>| row.number("test2").is_some_and(|v| v != 9.0));
    let picked = table.select_where(&["label", "test"], &m).unwrap();
    assert_eq!(
        picked.texts("label").unwrap(),
        &["a".to_owned(), "c".to_owned()]
    );
    assert_column(&picked, "test", &[5.0, 3.0]);
}

#[test]
fn select_index_gathers_rows_in_the_given_order() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 3.0]).unwrap();

    let picked = table.select_index(&["test"], &[2, 0]).unwrap();
    assert_column(&picked, "test", &[3.0, 5.0]);
}

#[test]
fn unique_keeps_one_row_per_distinct_tuple() {
    let mut table = Table::new();
    table.add_column("test", vec![5.0, 4.0, 5.0, 4.0]).unwrap();
    table.add_column("test2", vec![8.0, 9.0, 8.0, 9.0]).unwrap();
    table
        .add_text_column("label", vec!["a".into(), "b".into(), "a".into(), "b".into()])
        .unwrap();

    let distinct = table.unique();
    assert_eq!(distinct.row_count(), 2);
    assert_eq!(
        distinct.row(0),
        Some(vec![
            Value::Number(4.0),
            Value::Number(9.0),
            Value::Text("b".to_owned())
        ])
    );
    assert_eq!(
        distinct.row(1),
        Some(vec![
            Value::Number(5.0),
            Value::Number(8.0),
            Value::Text("a".to_owned())
        ])
    );
    assert_eq!(distinct.key_names(), Vec::<&str>::new());
}

#[test]
fn unique_leaves_the_source_table_order_and_key_alone() {
    let mut table = Table::new();
    table.add_column("k", vec![2.0, 1.0, 2.0]).unwrap();
    table.add_column("x", vec![10.0, 20.0, 10.0]).unwrap();
    table.set_key(&["k"]).unwrap();
    let before: Vec<f64> = table.numbers("x").unwrap().to_vec();

    let distinct = table.unique();
    assert_eq!(distinct.row_count(), 2);
    assert_eq!(table.numbers("x").unwrap(), &before[..]);
    assert_eq!(table.key_names(), vec!["k"]);
}

#[test]
fn unique_of_a_zero_row_table_is_empty() {
    let mut table = Table::new();
    table.add_column("x", Vec::new()).unwrap();
    let distinct = table.unique();
    assert_eq!(distinct.column_count(), 0);
    assert_eq!(distinct.row_count(), 0);
}
