use tabular_pg_loader::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader};
use tabular_pg_loader::types::{DataType, Value};

fn reader(input: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes())
}

#[test]
fn ingest_csv_from_path_infers_column_types() {
    let ds = ingest_csv_from_path("tests/fixtures/transactions.csv").unwrap();

    assert_eq!(ds.row_count(), 3);
    let types: Vec<(&str, DataType)> = ds
        .schema
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.data_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("ID", DataType::Int64),
            ("Merchant", DataType::Utf8),
            ("Date", DataType::Utf8),
            ("Amount_In_USD", DataType::Utf8),
            ("Flagged", DataType::Bool),
        ]
    );
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("  ACME Corp ".to_string()),
            Value::Utf8("31/01/2023".to_string()),
            Value::Utf8("1,234.50".to_string()),
            Value::Bool(true),
        ]
    );
}

#[test]
fn ingest_csv_maps_na_tokens_to_null() {
    let ds = ingest_csv_from_path("tests/fixtures/transactions.csv").unwrap();
    assert_eq!(ds.rows[2][1], Value::Null);
    assert_eq!(ds.rows[2][3], Value::Null);
    assert_eq!(ds.rows[2][4], Value::Null);
}

#[test]
fn ingest_csv_keeps_backslash_text_verbatim() {
    let ds = ingest_csv_from_path("tests/fixtures/transactions.csv").unwrap();
    assert_eq!(ds.rows[1][1], Value::Utf8("Globex\\nInc".to_string()));
}

#[test]
fn ingest_csv_widens_mixed_numbers_to_float() {
    let mut rdr = reader("n\n1\n2.5\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
    assert_eq!(ds.rows.len(), 2);
    assert_eq!(ds.rows[0][0], Value::Float64(1.0));
}

#[test]
fn ingest_csv_renames_duplicate_headers() {
    let mut rdr = reader("name,Name,name\na,b,c\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["name", "Name", "name.1"]
    );
}

#[test]
fn ingest_csv_header_only_yields_empty_dataset() {
    let mut rdr = reader("id,name\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.row_count(), 0);
    assert_eq!(ds.column_count(), 2);
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
}

#[test]
fn ingest_csv_errors_on_empty_input() {
    let mut rdr = reader("");
    let err = ingest_csv_from_reader(&mut rdr).unwrap_err();
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn ingest_csv_errors_on_ragged_rows() {
    let mut rdr = reader("id,name\n1,Ada,extra\n");
    let err = ingest_csv_from_reader(&mut rdr).unwrap_err();
    assert!(err.to_string().contains("csv error"));
}
