//! Text cleanup for string columns.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{DataSet, DataType, Value};

/// Escape sequences stripped from text values: a literal `\x` followed by two hex digits, a
/// literal double backslash, or a literal backslash followed by one or more `n`.
pub const ESCAPE_SEQUENCE_PATTERN: &str = r"\\x[a-fA-F0-9]{2}|\\\\|\\n+";

static ESCAPE_SEQUENCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ESCAPE_SEQUENCE_PATTERN).expect("escape sequence pattern compiles"));

/// Strip escape sequences, trim surrounding whitespace, and lowercase.
pub fn clean_text(raw: &str) -> String {
    ESCAPE_SEQUENCES.replace_all(raw, "").trim().to_lowercase()
}

/// Apply [`clean_text`] to every value of every `Utf8` column; missing values become `""`.
///
/// Returns the number of columns cleaned.
pub fn clean_text_columns(dataset: &mut DataSet) -> usize {
    let text_columns: Vec<usize> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type == DataType::Utf8)
        .map(|(idx, _)| idx)
        .collect();

    for &idx in &text_columns {
        dataset.map_column(idx, |v| match v {
            Value::Null => Value::Utf8(String::new()),
            Value::Utf8(s) => Value::Utf8(clean_text(&s)),
            v @ (Value::Date(_) | Value::Timestamp(_)) => v,
            other => Value::Utf8(clean_text(&other.to_string())),
        });
    }
    text_columns.len()
}
