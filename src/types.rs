//! Core data model types.
//!
//! Every stage passes an in-memory [`DataSet`] along: the collector builds one per input file and
//! concatenates them, the normalizer rewrites it in place, and the loader writes it out.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Calendar date without a time zone.
    Date,
    /// Date and time without a time zone.
    Timestamp,
}

impl DataType {
    /// Returns the narrowest type able to hold values of both `self` and `other`.
    ///
    /// - equal types stay as they are
    /// - `Int64` + `Float64` widen to `Float64`
    /// - `Date` + `Timestamp` widen to `Timestamp`
    /// - any other combination falls back to `Utf8`
    pub fn unify(self, other: DataType) -> DataType {
        use DataType::{Date, Float64, Int64, Timestamp, Utf8};
        match (self, other) {
            (a, b) if a == b => a,
            (Int64, Float64) | (Float64, Int64) => Float64,
            (Date, Timestamp) | (Timestamp, Date) => Timestamp,
            _ => Utf8,
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// The [`DataType`] of this value, or `None` for [`Value::Null`].
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::Bool(_) => Some(DataType::Bool),
            Value::Utf8(_) => Some(DataType::Utf8),
            Value::Date(_) => Some(DataType::Date),
            Value::Timestamp(_) => Some(DataType::Timestamp),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert this value to `target`, following the widening rules of [`DataType::unify`].
    ///
    /// Returns `None` when the conversion is not one of those rules (e.g. `Utf8` -> `Int64`).
    /// `Null` casts to `Null` for every target.
    pub fn cast(self, target: DataType) -> Option<Value> {
        match (self, target) {
            (Value::Null, _) => Some(Value::Null),
            (v, t) if v.data_type() == Some(t) => Some(v),
            (Value::Int64(i), DataType::Float64) => Some(Value::Float64(i as f64)),
            (Value::Date(d), DataType::Timestamp) => d.and_hms_opt(0, 0, 0).map(Value::Timestamp),
            (v, DataType::Utf8) => Some(Value::Utf8(v.to_string())),
            _ => None,
        }
    }

    /// Fit this value into a concatenated column of type `target`.
    ///
    /// Same as [`Value::cast`], except that `Date` and `Timestamp` values landing in a `Utf8`
    /// column stay typed so the date parser can still use them. Anything that does not cast
    /// becomes `Null`.
    pub fn conform(self, target: DataType) -> Value {
        match (self, target) {
            (v @ (Value::Date(_) | Value::Timestamp(_)), DataType::Utf8) => v,
            (v, t) => v.cast(t).unwrap_or(Value::Null),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" on whole floats.
            Value::Float64(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Utf8(v) => f.write_str(v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Every
/// non-null value matches its field's type, except that a `Utf8` column built by
/// [`DataSet::concat`] may also hold `Date`/`Timestamp` values (see [`Value::conform`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Values of the named column, top to bottom, or `None` if there is no such column.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Replace every value of column `idx` with `mapper(value)`.
    ///
    /// The caller is responsible for updating the field's [`DataType`] when the mapper changes
    /// the kind of value stored.
    pub fn map_column<F>(&mut self, idx: usize, mut mapper: F)
    where
        F: FnMut(Value) -> Value,
    {
        for row in &mut self.rows {
            let v = std::mem::replace(&mut row[idx], Value::Null);
            row[idx] = mapper(v);
        }
    }

    /// Concatenate datasets vertically, aligning columns by name.
    ///
    /// The output schema is the union of all column names in order of first appearance. A
    /// column's type is the [`DataType::unify`] of its type in every input where it holds at least
    /// one non-null value; inputs that lack a column contribute `Null` for it. Rows keep input
    /// order, then original row order.
    pub fn concat(datasets: Vec<DataSet>) -> DataSet {
        let mut fields: Vec<Field> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut typed_by_data: Vec<bool> = Vec::new();

        for ds in &datasets {
            for (col, field) in ds.schema.fields.iter().enumerate() {
                let has_values = ds.rows.iter().any(|row| !row[col].is_null());
                match positions.get(&field.name) {
                    None => {
                        positions.insert(field.name.clone(), fields.len());
                        fields.push(field.clone());
                        typed_by_data.push(has_values);
                    }
                    Some(&pos) if has_values => {
                        let out = &mut fields[pos];
                        out.data_type = if typed_by_data[pos] {
                            out.data_type.unify(field.data_type)
                        } else {
                            field.data_type
                        };
                        typed_by_data[pos] = true;
                    }
                    Some(_) => {}
                }
            }
        }

        let total_rows = datasets.iter().map(DataSet::row_count).sum();
        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(total_rows);
        for ds in datasets {
            let targets: Vec<usize> = ds
                .schema
                .fields
                .iter()
                .map(|f| positions[&f.name])
                .collect();
            for row in ds.rows {
                let mut out = vec![Value::Null; fields.len()];
                for (value, &pos) in row.into_iter().zip(targets.iter()) {
                    out[pos] = value.conform(fields[pos].data_type);
                }
                rows.push(out);
            }
        }

        DataSet::new(Schema::new(fields), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds(fields: Vec<(&str, DataType)>, rows: Vec<Vec<Value>>) -> DataSet {
        let schema = Schema::new(fields.into_iter().map(|(n, t)| Field::new(n, t)).collect());
        DataSet::new(schema, rows)
    }

    #[test]
    fn unify_widens_numbers_and_dates() {
        assert_eq!(DataType::Int64.unify(DataType::Float64), DataType::Float64);
        assert_eq!(DataType::Timestamp.unify(DataType::Date), DataType::Timestamp);
        assert_eq!(DataType::Bool.unify(DataType::Int64), DataType::Utf8);
        assert_eq!(DataType::Utf8.unify(DataType::Utf8), DataType::Utf8);
    }

    #[test]
    fn concat_aligns_columns_by_name_and_fills_missing() {
        let a = ds(
            vec![("id", DataType::Int64), ("name", DataType::Utf8)],
            vec![vec![Value::Int64(1), Value::Utf8("ada".into())]],
        );
        let b = ds(
            vec![("amount", DataType::Float64), ("id", DataType::Int64)],
            vec![
                vec![Value::Float64(2.5), Value::Int64(2)],
                vec![Value::Float64(3.5), Value::Int64(3)],
            ],
        );

        let out = DataSet::concat(vec![a, b]);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["id", "name", "amount"]);
        assert_eq!(out.row_count(), 3);
        assert_eq!(
            out.rows[0],
            vec![Value::Int64(1), Value::Utf8("ada".into()), Value::Null]
        );
        assert_eq!(
            out.rows[2],
            vec![Value::Int64(3), Value::Null, Value::Float64(3.5)]
        );
    }

    #[test]
    fn concat_widens_mixed_numeric_columns() {
        let a = ds(vec![("x", DataType::Int64)], vec![vec![Value::Int64(1)]]);
        let b = ds(vec![("x", DataType::Float64)], vec![vec![Value::Float64(0.5)]]);

        let out = DataSet::concat(vec![a, b]);
        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(out.rows, vec![vec![Value::Float64(1.0)], vec![Value::Float64(0.5)]]);
    }

    #[test]
    fn concat_renders_incompatible_columns_as_text() {
        let a = ds(vec![("x", DataType::Int64)], vec![vec![Value::Int64(7)]]);
        let b = ds(vec![("x", DataType::Bool)], vec![vec![Value::Bool(true)]]);

        let out = DataSet::concat(vec![a, b]);
        assert_eq!(out.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(
            out.rows,
            vec![vec![Value::Utf8("7".into())], vec![Value::Utf8("true".into())]]
        );
    }

    #[test]
    fn concat_keeps_dates_in_text_columns() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let a = ds(vec![("x", DataType::Date)], vec![vec![Value::Date(d)]]);
        let b = ds(vec![("x", DataType::Utf8)], vec![vec![Value::Utf8("15/02/2023".into())]]);

        let out = DataSet::concat(vec![a, b]);
        assert_eq!(out.schema.fields[0].data_type, DataType::Utf8);
        assert_eq!(
            out.rows,
            vec![vec![Value::Date(d)], vec![Value::Utf8("15/02/2023".into())]]
        );
    }

    #[test]
    fn concat_ignores_all_null_columns_when_typing() {
        let a = ds(vec![("x", DataType::Utf8)], vec![vec![Value::Null]]);
        let b = ds(vec![("x", DataType::Int64)], vec![vec![Value::Int64(4)]]);

        let out = DataSet::concat(vec![a, b]);
        assert_eq!(out.schema.fields[0].data_type, DataType::Int64);
        assert_eq!(out.rows, vec![vec![Value::Null], vec![Value::Int64(4)]]);
    }

    #[test]
    fn column_values_and_map_column() {
        let mut d = ds(
            vec![("n", DataType::Int64)],
            vec![vec![Value::Int64(1)], vec![Value::Int64(2)]],
        );
        d.map_column(0, |v| match v {
            Value::Int64(i) => Value::Int64(i * 10),
            other => other,
        });
        assert_eq!(
            d.column_values("n").unwrap(),
            vec![&Value::Int64(10), &Value::Int64(20)]
        );
        assert!(d.column_values("missing").is_none());
    }
}
