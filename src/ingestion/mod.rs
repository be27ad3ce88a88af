//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`collect_from_dir`] (from [`collect`]) which:
//!
//! - scans one directory level for `.csv` / `.parquet` files
//! - ingests each into an in-memory [`crate::types::DataSet`] with inferred column types
//! - concatenates them, aligning columns by name
//!
//! Single files can be read with [`ingest_from_path`], which optionally reports
//! success/failure/alerts to an [`IngestionObserver`]. Format-specific functions are also
//! available under:
//! - [`csv`]
//! - [`parquet`]

pub mod collect;
pub mod csv;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use collect::collect_from_dir;
pub use observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver};
pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions};
