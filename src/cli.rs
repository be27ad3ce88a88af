//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "tabular-pg-loader",
    version,
    about = "Process and clean datasets, then upload to PostgreSQL.",
    long_about = "Reads every CSV and Parquet file in a directory, combines and normalizes them,\n\
                  and replaces a PostgreSQL table with the result."
)]
pub struct Cli {
    /// Directory containing CSV and Parquet files.
    #[arg(long = "source_dir", value_name = "PATH")]
    pub source_dir: PathBuf,

    /// Path to PostgreSQL configuration JSON file.
    #[arg(long = "postgres_config", value_name = "PATH")]
    pub postgres_config: PathBuf,

    /// Name of the table to store data in PostgreSQL (replaced if it exists).
    #[arg(long = "table_name", value_name = "NAME")]
    pub table_name: String,

    /// Explicit log level (overrides RUST_LOG).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact")]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
