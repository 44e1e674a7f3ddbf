use pretty_assertions::assert_eq;
use tabula_core::{ColumnType, Table, TableError, Value};
use tabula_io::{parse_row, read_csv, write_csv, RowParseError};

fn csv_string(table: &Table) -> String {
    let mut buf = Vec::new();
    write_csv(table, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn export_writes_header_then_rows_with_trailing_newline() {
    let mut table = Table::new();
    table
        .add_column("c1", vec![1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0])
        .unwrap();
    table
        .add_column("c2", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
        .unwrap();

    let expected = "\
c1,c2
1,1
1,2
1,3
2,4
2,5
3,6
3,7
3,8
4,9
";
    assert_eq!(csv_string(&table), expected);
}

#[test]
fn export_quotes_fields_that_need_it() {
    let mut table = Table::new();
    table
        .add_text_column(
            "name",
            vec!["plain".to_owned(), "with,comma".to_owned(), "with\"quote".to_owned()],
        )
        .unwrap();
    table.add_column("x", vec![1.5, 2.0, 3.0]).unwrap();

    let expected = "\
name,x
plain,1.5
\"with,comma\",2
\"with\"\"quote\",3
";
    assert_eq!(csv_string(&table), expected);
}

#[test]
fn export_formats_non_finite_floats_per_host_convention() {
    let mut table = Table::new();
    table
        .add_column("x", vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY])
        .unwrap();

    let expected = "\
x
NaN
inf
-inf
";
    assert_eq!(csv_string(&table), expected);
}

#[test]
fn export_of_a_zero_column_table_is_empty() {
    let table = Table::new();
    assert_eq!(csv_string(&table), "");
}

#[test]
fn parse_row_appends_typed_values() {
    let mut table = Table::new();
    table.add_column("n", vec![1.0]).unwrap();
    table.add_text_column("s", vec!["a".to_owned()]).unwrap();

    parse_row(&mut table, &["2.5", "b"]).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.row(1),
        Some(vec![Value::Number(2.5), Value::Text("b".to_owned())])
    );
}

#[test]
fn parse_row_checks_the_field_count() {
    let mut table = Table::new();
    table.add_column("n", vec![1.0]).unwrap();

    let err = parse_row(&mut table, &["1", "2"]).unwrap_err();
    match err {
        RowParseError::Table(TableError::WrongColumnCount { expected, got }) => {
            assert_eq!((expected, got), (1, 2));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_row_reports_the_failing_column_and_appends_nothing() {
    let mut table = Table::new();
    table.add_text_column("s", vec!["a".to_owned()]).unwrap();
    table.add_column("n", vec![1.0]).unwrap();

    let err = parse_row(&mut table, &["b", "not-a-number"]).unwrap_err();
    match err {
        RowParseError::Parse { column, .. } => assert_eq!(column, 1),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(table.row_count(), 1);
}

#[test]
fn parse_row_accepts_non_finite_numerals() {
    let mut table = Table::new();
    table.add_column("n", vec![0.0]).unwrap();
    parse_row(&mut table, &["NaN"]).unwrap();
    parse_row(&mut table, &["inf"]).unwrap();
    let values = table.numbers("n").unwrap();
    assert!(values[1].is_nan());
    assert_eq!(values[2], f64::INFINITY);
}

#[test]
fn read_csv_detects_numeric_and_text_columns() {
    let input = "\
city,population
ac,42
bn,7.5
";
    let table = read_csv(input.as_bytes()).unwrap();
    assert_eq!(table.column_names(), vec!["city", "population"]);
    assert_eq!(table.column_type("city"), Some(ColumnType::Text));
    assert_eq!(table.column_type("population"), Some(ColumnType::Number));
    assert_eq!(table.numbers("population").unwrap(), &[42.0, 7.5]);
    assert_eq!(
        table.texts("city").unwrap(),
        &["ac".to_owned(), "bn".to_owned()]
    );
}

#[test]
fn read_csv_treats_mixed_columns_as_text() {
    let input = "\
v
1
two
3
";
    let table = read_csv(input.as_bytes()).unwrap();
    assert_eq!(table.column_type("v"), Some(ColumnType::Text));
    assert_eq!(
        table.texts("v").unwrap(),
        &["1".to_owned(), "two".to_owned(), "3".to_owned()]
    );
}

#[test]
fn read_csv_of_an_empty_stream_fails() {
    let err = read_csv("".as_bytes()).unwrap_err();
    assert!(matches!(err, tabula_io::CsvReadError::EmptyInput));
}

#[test]
fn read_csv_header_only_yields_zero_rows() {
    let table = read_csv("a,b\n".as_bytes()).unwrap();
    assert_eq!(table.column_names(), vec!["a", "b"]);
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_type("a"), Some(ColumnType::Number));
}

#[test]
fn export_then_read_round_trips_a_numeric_table() {
    let mut table = Table::new();
    table.add_column("k", vec![2.0, 1.0, 2.0]).unwrap();
    table.add_column("x", vec![0.5, -3.0, 7.0]).unwrap();

    let text = csv_string(&table);
    let back = read_csv(text.as_bytes()).unwrap();
    assert_eq!(back.column_names(), table.column_names());
    assert_eq!(back.numbers("k").unwrap(), table.numbers("k").unwrap());
    assert_eq!(back.numbers("x").unwrap(), table.numbers("x").unwrap());
}
