use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the collector and the format readers.
///
/// This is a single error enum shared across CSV and Parquet ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The source directory could not be listed.
    #[error("directory scan error: {0}")]
    Walk(#[from] walkdir::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet ingestion error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The input does not have the shape the reader expects (e.g. a row without a column).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// The file format could not be determined from the path.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The source directory holds no `.csv` or `.parquet` files.
    #[error("no CSV or Parquet files found in {}", dir.display())]
    NoInputData { dir: PathBuf },
}

/// Error type returned while reading credentials and writing to PostgreSQL.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The credential file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The credential file is not valid JSON or lacks a required key.
    #[error("invalid postgres config: {0}")]
    Config(#[from] serde_json::Error),

    /// Connection, authentication, or write failure reported by the server.
    #[error("postgres error: {0}")]
    Postgres(#[from] postgres::Error),
}
