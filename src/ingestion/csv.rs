//! CSV ingestion implementation.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell contents read as missing values.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first record is the header; duplicate names get `.1`, `.2`, ... suffixes.
/// - Cells matching one of [`NA_TOKENS`] become [`Value::Null`].
/// - Each column's type is inferred from its non-null cells (see [`infer_column_type`]).
/// - Every record must have as many fields as the header.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "csv input has no header row".to_string(),
        });
    }
    let names = dedupe_headers(headers.iter());

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|cell| (!is_na(cell)).then(|| cell.to_owned()))
            .collect();
        raw_rows.push(row);
    }

    let types: Vec<DataType> = (0..names.len())
        .map(|col| infer_column_type(raw_rows.iter().filter_map(|row| row[col].as_deref())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(types.iter())
                .map(|(cell, data_type)| match cell {
                    Some(raw) => parse_typed_value(raw, *data_type),
                    None => Value::Null,
                })
                .collect()
        })
        .collect();

    let fields = names
        .into_iter()
        .zip(types)
        .map(|(name, data_type)| Field::new(name, data_type))
        .collect();
    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Infer a column type from its non-null cells.
///
/// All integers gives `Int64`, all numbers `Float64`, all `true`/`false` `Bool`, anything else
/// (including a column without values) `Utf8`.
pub fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut seen = false;
    let (mut int, mut float, mut boolean) = (true, true, true);
    for raw in cells {
        seen = true;
        let trimmed = raw.trim();
        int = int && trimmed.parse::<i64>().is_ok();
        float = float && trimmed.parse::<f64>().is_ok();
        boolean = boolean && parse_bool(trimmed).is_some();
        if !(int || float || boolean) {
            break;
        }
    }

    match (seen, int, float, boolean) {
        (false, ..) => DataType::Utf8,
        (true, true, _, _) => DataType::Int64,
        (true, _, true, _) => DataType::Float64,
        (true, _, _, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let headers: Vec<&str> = headers.collect();
    let mut used: HashSet<String> = headers.iter().map(|h| (*h).to_owned()).collect();
    let mut first_seen: HashSet<&str> = HashSet::new();
    let mut counters: HashMap<&str, usize> = HashMap::new();

    headers
        .iter()
        .map(|&name| {
            if first_seen.insert(name) {
                return name.to_owned();
            }
            let counter = counters.entry(name).or_insert(0);
            loop {
                *counter += 1;
                let candidate = format!("{name}.{counter}");
                if used.insert(candidate.clone()) {
                    return candidate;
                }
            }
        })
        .collect()
}

// Only called with a type produced by `infer_column_type` for the same cells.
fn parse_typed_value(raw: String, data_type: DataType) -> Value {
    let trimmed = raw.trim();
    match data_type {
        DataType::Int64 => trimmed.parse().map(Value::Int64).unwrap_or(Value::Null),
        DataType::Float64 => trimmed.parse().map(Value::Float64).unwrap_or(Value::Null),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
        DataType::Utf8 | DataType::Date | DataType::Timestamp => Value::Utf8(raw),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
