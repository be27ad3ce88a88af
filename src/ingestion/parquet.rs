//! Parquet ingestion implementation.

use std::collections::HashMap;
use std::path::Path;

use chrono::DateTime;
use parquet::basic::{ConvertedType, Type as PhysicalType};
use parquet::file::reader::FileReader;
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field as ParquetField;
use parquet::schema::types::Type as SchemaType;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Ingest a Parquet file into an in-memory `DataSet`.
///
/// Notes:
/// - Every top-level column of the file schema becomes a dataset column, in file order
/// - A column's type comes from its values; all-null columns fall back to the declared type
/// - Nested and binary values are carried as their text rendering
/// - Uses the Parquet record API (`RowIter`)
pub fn ingest_parquet_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let declared: Vec<(String, DataType)> = reader
        .metadata()
        .file_metadata()
        .schema()
        .get_fields()
        .iter()
        .map(|t| (t.name().to_string(), declared_type(t)))
        .collect();

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); declared.len()];
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        // Build a name->Field map for lookup.
        let mut map: HashMap<&str, &ParquetField> = HashMap::new();
        for (name, field) in row.get_column_iter() {
            map.insert(name.as_str(), field);
        }

        for ((name, _), column) in declared.iter().zip(columns.iter_mut()) {
            let v = map.get(name.as_str()).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row_num} missing column '{name}'"),
            })?;
            column.push(convert_parquet_field(v));
        }
    }

    let mut fields = Vec::with_capacity(declared.len());
    for ((name, declared_type), column) in declared.into_iter().zip(columns.iter_mut()) {
        let data_type = column
            .iter()
            .filter_map(Value::data_type)
            .reduce(DataType::unify)
            .unwrap_or(declared_type);
        for v in column.iter_mut() {
            let owned = std::mem::replace(v, Value::Null);
            *v = owned.cast(data_type).unwrap_or(Value::Null);
        }
        fields.push(Field::new(name, data_type));
    }

    let row_count = columns.first().map_or(0, Vec::len);
    let mut rows: Vec<Vec<Value>> = (0..row_count)
        .map(|_| Vec::with_capacity(fields.len()))
        .collect();
    for column in columns {
        for (row, v) in rows.iter_mut().zip(column) {
            row.push(v);
        }
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn declared_type(t: &SchemaType) -> DataType {
    if !t.is_primitive() {
        return DataType::Utf8;
    }
    match (t.get_physical_type(), t.get_basic_info().converted_type()) {
        (_, ConvertedType::DATE) => DataType::Date,
        (_, ConvertedType::TIMESTAMP_MILLIS | ConvertedType::TIMESTAMP_MICROS) => DataType::Timestamp,
        (_, ConvertedType::DECIMAL) => DataType::Float64,
        (PhysicalType::BOOLEAN, _) => DataType::Bool,
        (PhysicalType::INT32 | PhysicalType::INT64, _) => DataType::Int64,
        (PhysicalType::INT96, _) => DataType::Timestamp,
        (PhysicalType::FLOAT | PhysicalType::DOUBLE, _) => DataType::Float64,
        _ => DataType::Utf8,
    }
}

fn convert_parquet_field(f: &ParquetField) -> Value {
    match f {
        ParquetField::Null => Value::Null,
        ParquetField::Bool(b) => Value::Bool(*b),
        ParquetField::Byte(v) => Value::Int64(i64::from(*v)),
        ParquetField::Short(v) => Value::Int64(i64::from(*v)),
        ParquetField::Int(v) => Value::Int64(i64::from(*v)),
        ParquetField::Long(v) => Value::Int64(*v),
        ParquetField::UByte(v) => Value::Int64(i64::from(*v)),
        ParquetField::UShort(v) => Value::Int64(i64::from(*v)),
        ParquetField::UInt(v) => Value::Int64(i64::from(*v)),
        ParquetField::ULong(v) => i64::try_from(*v)
            .map(Value::Int64)
            .unwrap_or(Value::Float64(*v as f64)),
        ParquetField::Float16(v) => Value::Float64(v.to_f64()),
        ParquetField::Float(v) => Value::Float64(f64::from(*v)),
        ParquetField::Double(v) => Value::Float64(*v),
        ParquetField::Decimal(_) => {
            let text = f.to_string();
            text.parse().map(Value::Float64).unwrap_or(Value::Utf8(text))
        }
        ParquetField::Str(s) => Value::Utf8(s.clone()),
        ParquetField::Date(days) => DateTime::from_timestamp(i64::from(*days) * 86_400, 0)
            .map(|dt| Value::Date(dt.date_naive()))
            .unwrap_or(Value::Null),
        ParquetField::TimestampMillis(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| Value::Timestamp(dt.naive_utc()))
            .unwrap_or(Value::Null),
        ParquetField::TimestampMicros(us) => DateTime::from_timestamp_micros(*us)
            .map(|dt| Value::Timestamp(dt.naive_utc()))
            .unwrap_or(Value::Null),
        other => Value::Utf8(other.to_string()),
    }
}
