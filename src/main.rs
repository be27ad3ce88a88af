//! Directory-to-PostgreSQL loader CLI.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tabular_pg_loader::ingestion::{collect_from_dir, IngestionOptions, TracingObserver};
use tabular_pg_loader::load::{PostgresConfig, PostgresLoader};
use tabular_pg_loader::logging::{init_logging, LogConfig, LogFormat};
use tabular_pg_loader::processing::{normalize, NormalizeOptions};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli)).context("failed to initialize logging")?;

    run(&cli)?;
    println!("Data processing complete.");
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let ingestion = IngestionOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..IngestionOptions::default()
    };
    let combined = collect_from_dir(&cli.source_dir, &ingestion)
        .with_context(|| format!("failed to collect datasets from {}", cli.source_dir.display()))?;

    let cleaned = normalize(combined, &NormalizeOptions::default());

    let config = PostgresConfig::from_path(&cli.postgres_config)
        .with_context(|| format!("failed to read {}", cli.postgres_config.display()))?;
    let mut loader = PostgresLoader::connect(&config)
        .with_context(|| format!("failed to connect to {}:{}/{}", config.host, config.port, config.database))?;
    loader
        .replace_table(&cli.table_name, &cleaned)
        .with_context(|| format!("failed to replace table {}", cli.table_name))?;
    Ok(())
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        use_env_filter: cli.log_level.is_none(),
        with_ansi: io::stderr().is_terminal(),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config
}
