//! PostgreSQL loader.
//!
//! [`PostgresLoader::replace_table`] overwrites a table with a [`DataSet`] inside one
//! transaction: the table is dropped if it exists, recreated with column types taken from the
//! dataset schema, and filled with a binary `COPY`. Nothing is appended and nothing is retried.

pub mod config;
pub mod sql;

use postgres::binary_copy::BinaryCopyInWriter;
use postgres::types::{ToSql, Type};
use postgres::{Client, NoTls, Transaction};

use crate::error::LoadResult;
use crate::types::{DataSet, DataType, Value};

pub use config::PostgresConfig;

/// Outcome of a successful [`PostgresLoader::replace_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: String,
    pub rows: u64,
    pub columns: usize,
}

/// A single blocking connection used to replace tables.
pub struct PostgresLoader {
    client: Client,
}

impl PostgresLoader {
    /// Connect without TLS using the given credentials.
    pub fn connect(config: &PostgresConfig) -> LoadResult<Self> {
        tracing::debug!(host = %config.host, port = config.port, database = %config.database, "connecting");
        let client = config.to_pg_config().connect(NoTls)?;
        Ok(Self { client })
    }

    /// Drop `table` if it exists, recreate it from `dataset`'s schema, and copy every row in.
    ///
    /// All three steps share one transaction, so a failure leaves the previous table in place.
    pub fn replace_table(&mut self, table: &str, dataset: &DataSet) -> LoadResult<LoadSummary> {
        let mut tx = self.client.transaction()?;
        tx.batch_execute(&sql::drop_table_sql(table))?;
        tx.batch_execute(&sql::create_table_sql(table, &dataset.schema))?;
        let rows = if dataset.column_count() == 0 {
            0
        } else {
            copy_rows(&mut tx, table, dataset)?
        };
        tx.commit()?;

        tracing::info!(table, rows, columns = dataset.column_count(), "replaced table");
        Ok(LoadSummary {
            table: table.to_string(),
            rows,
            columns: dataset.column_count(),
        })
    }
}

fn copy_rows(tx: &mut Transaction<'_>, table: &str, dataset: &DataSet) -> LoadResult<u64> {
    let types: Vec<Type> = dataset
        .schema
        .fields
        .iter()
        .map(|f| pg_type(f.data_type))
        .collect();
    let copy_sql = sql::copy_in_sql(table, &dataset.schema);
    let sink = tx.copy_in(copy_sql.as_str())?;
    let mut writer = BinaryCopyInWriter::new(sink, &types);

    for row in &dataset.rows {
        let params: Vec<Box<dyn ToSql + Sync + '_>> = row
            .iter()
            .zip(dataset.schema.fields.iter())
            .map(|(value, field)| sql_param(value, field.data_type))
            .collect();
        let refs: Vec<&(dyn ToSql + Sync)> = params.iter().map(|p| &**p).collect();
        writer.write(&refs)?;
    }
    Ok(writer.finish()?)
}

fn pg_type(data_type: DataType) -> Type {
    match data_type {
        DataType::Int64 => Type::INT8,
        DataType::Float64 => Type::FLOAT8,
        DataType::Bool => Type::BOOL,
        DataType::Utf8 => Type::TEXT,
        DataType::Date => Type::DATE,
        DataType::Timestamp => Type::TIMESTAMP,
    }
}

// Nulls need a typed `Option` so the binary encoder picks the column's type.
fn sql_param(value: &Value, data_type: DataType) -> Box<dyn ToSql + Sync + '_> {
    match value {
        // Dates carried in a text column are written in their display form.
        Value::Date(_) | Value::Timestamp(_) if data_type == DataType::Utf8 => Box::new(value.to_string()),
        Value::Int64(v) => Box::new(*v),
        Value::Float64(v) => Box::new(*v),
        Value::Bool(v) => Box::new(*v),
        Value::Utf8(v) => Box::new(v.as_str()),
        Value::Date(v) => Box::new(*v),
        Value::Timestamp(v) => Box::new(*v),
        Value::Null => match data_type {
            DataType::Int64 => Box::new(None::<i64>),
            DataType::Float64 => Box::new(None::<f64>),
            DataType::Bool => Box::new(None::<bool>),
            DataType::Utf8 => Box::new(None::<&str>),
            DataType::Date => Box::new(None::<chrono::NaiveDate>),
            DataType::Timestamp => Box::new(None::<chrono::NaiveDateTime>),
        },
    }
}
