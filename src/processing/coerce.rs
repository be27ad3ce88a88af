//! Date and amount coercion for well-known columns.
//!
//! A value that cannot be converted falls back to a fixed marker (`Null` for dates, `0` for
//! amounts); neither coercion fails.

use chrono::{Datelike, NaiveDate};

use crate::types::{DataSet, DataType, Value};

/// Parse a single value as a date in `format`.
///
/// Text that does not match becomes [`Value::Null`], and so does a year outside `1000..=9999`
/// (chrono's `%Y` would otherwise read `"31/01/23"` as year 23). `Date` values are kept and
/// timestamps are truncated to their date.
pub fn parse_date_value(value: Value, format: &str) -> Value {
    match value {
        Value::Utf8(s) => NaiveDate::parse_from_str(s.trim(), format)
            .ok()
            .filter(|d| (1000..=9999).contains(&d.year()))
            .map_or(Value::Null, Value::Date),
        Value::Date(d) => Value::Date(d),
        Value::Timestamp(ts) => Value::Date(ts.date()),
        _ => Value::Null,
    }
}

/// Parse a single value as a decimal amount.
///
/// Thousands separators (`,`) are removed from text first. Anything that does not parse,
/// including `Null` and NaN, becomes `0`.
pub fn parse_amount_value(value: Value) -> Value {
    let parsed = match value {
        Value::Utf8(s) => s.replace(',', "").trim().parse::<f64>().ok(),
        Value::Int64(i) => Some(i as f64),
        Value::Float64(f) => Some(f),
        _ => None,
    };
    Value::Float64(parsed.filter(|f| !f.is_nan()).unwrap_or(0.0))
}

/// Convert column `column` with [`parse_date_value`] and retype it as `Date`.
///
/// Returns `false` (and leaves the dataset untouched) when the column does not exist.
pub fn parse_date_column(dataset: &mut DataSet, column: &str, format: &str) -> bool {
    let Some(idx) = dataset.schema.index_of(column) else {
        return false;
    };
    dataset.map_column(idx, |v| parse_date_value(v, format));
    dataset.schema.fields[idx].data_type = DataType::Date;
    true
}

/// Convert column `column` with [`parse_amount_value`] and retype it as `Float64`.
///
/// Returns `false` (and leaves the dataset untouched) when the column does not exist.
pub fn parse_amount_column(dataset: &mut DataSet, column: &str) -> bool {
    let Some(idx) = dataset.schema.index_of(column) else {
        return false;
    };
    dataset.map_column(idx, parse_amount_value);
    dataset.schema.fields[idx].data_type = DataType::Float64;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const DMY: &str = "%d/%m/%Y";

    #[test]
    fn date_values_parse_day_month_year() {
        assert_eq!(
            parse_date_value(Value::Utf8("31/01/2023".into()), DMY),
            Value::Date(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap())
        );
        assert_eq!(parse_date_value(Value::Utf8("not-a-date".into()), DMY), Value::Null);
        assert_eq!(parse_date_value(Value::Utf8("2023-01-31".into()), DMY), Value::Null);
        assert_eq!(parse_date_value(Value::Utf8("31/02/2023".into()), DMY), Value::Null);
        assert_eq!(parse_date_value(Value::Utf8("31/01/23".into()), DMY), Value::Null);
        assert_eq!(parse_date_value(Value::Utf8("31/01/20230".into()), DMY), Value::Null);
        assert_eq!(
            parse_date_value(Value::Utf8("1/2/2023".into()), DMY),
            Value::Date(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap())
        );
        assert_eq!(parse_date_value(Value::Utf8(String::new()), DMY), Value::Null);
        assert_eq!(parse_date_value(Value::Int64(20230131), DMY), Value::Null);
    }

    #[test]
    fn date_values_keep_typed_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_date_value(Value::Date(d), DMY), Value::Date(d));
        let ts = d.and_hms_opt(13, 5, 0).unwrap();
        assert_eq!(parse_date_value(Value::Timestamp(ts), DMY), Value::Date(d));
    }

    #[test]
    fn amount_values_strip_separators_and_default_to_zero() {
        assert_eq!(parse_amount_value(Value::Utf8("1,234.50".into())), Value::Float64(1234.5));
        assert_eq!(parse_amount_value(Value::Utf8("1,000,000".into())), Value::Float64(1_000_000.0));
        assert_eq!(parse_amount_value(Value::Utf8("n/a".into())), Value::Float64(0.0));
        assert_eq!(parse_amount_value(Value::Utf8(String::new())), Value::Float64(0.0));
        assert_eq!(parse_amount_value(Value::Null), Value::Float64(0.0));
        assert_eq!(parse_amount_value(Value::Int64(42)), Value::Float64(42.0));
        assert_eq!(parse_amount_value(Value::Float64(f64::NAN)), Value::Float64(0.0));
    }

    #[test]
    fn missing_columns_are_left_alone() {
        let mut ds = DataSet::default();
        assert!(!parse_date_column(&mut ds, "date", DMY));
        assert!(!parse_amount_column(&mut ds, "amount_in_usd"));
        assert_eq!(ds, DataSet::default());
    }
}
