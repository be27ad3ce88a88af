//! `tabular-pg-loader` collects CSV and Parquet files from a directory into an in-memory
//! [`types::DataSet`], normalizes it, and replaces a PostgreSQL table with the result.
//!
//! The work happens in three sequential stages:
//!
//! 1. **Collect** ([`ingestion::collect_from_dir`]): every `.csv` / `.parquet` file directly inside
//!    the source directory (case-insensitive extension, sorted by file name) is read with inferred
//!    column types, and the files are concatenated with columns aligned by name.
//! 2. **Normalize** ([`processing::normalize`]): column names are lowercased, text columns are
//!    cleaned, the `date` column is parsed as day/month/year and `amount_in_usd` as a number.
//! 3. **Load** ([`load::PostgresLoader::replace_table`]): the destination table is dropped,
//!    recreated from the dataset schema, and filled in one transaction.
//!
//! ## Value types
//!
//! - [`types::DataType::Int64`], [`types::DataType::Float64`], [`types::DataType::Bool`]
//! - [`types::DataType::Utf8`] (text)
//! - [`types::DataType::Date`], [`types::DataType::Timestamp`]
//!
//! Missing cells map to [`types::Value::Null`].
//!
//! ## Example
//!
//! ```no_run
//! use tabular_pg_loader::ingestion::{collect_from_dir, IngestionOptions};
//! use tabular_pg_loader::load::{PostgresConfig, PostgresLoader};
//! use tabular_pg_loader::processing::{normalize, NormalizeOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let combined = collect_from_dir("source_dir", &IngestionOptions::default())?;
//! let cleaned = normalize(combined, &NormalizeOptions::default());
//!
//! let config = PostgresConfig::from_path("config.json")?;
//! let mut loader = PostgresLoader::connect(&config)?;
//! let summary = loader.replace_table("combine", &cleaned)?;
//! println!("rows={}", summary.rows);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: directory collector and CSV/Parquet readers
//! - [`processing`]: dataset normalization
//! - [`load`]: PostgreSQL credentials and table replacement
//! - [`types`]: schema + in-memory dataset types
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod load;
pub mod logging;
pub mod processing;
pub mod types;

pub use error::{IngestionError, IngestionResult, LoadError, LoadResult};
