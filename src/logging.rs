//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! All stages emit `tracing` events; the binary installs a subscriber writing to stderr so that
//! stdout only carries the completion message.
//!
//! # Log Levels
//!
//! - `error`: ingestion alerts
//! - `warn`: failed files, merged column collisions
//! - `info`: stage summaries (files collected, rows normalized, table replaced)
//! - `debug`: per-file details, skipped entries, connection target

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level used when `use_env_filter` is false or `RUST_LOG` is unset.
    pub level_filter: LevelFilter,
    /// Honor `RUST_LOG` when it is set.
    pub use_env_filter: bool,
    /// Output format.
    pub format: LogFormat,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            format: LogFormat::default(),
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// Build the `EnvFilter` for this configuration.
    pub fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::default().add_directive(self.level_filter.into());
        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
        } else {
            fallback()
        }
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber was already set.
pub fn init_logging(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = config.env_filter();
    let registry = tracing_subscriber::registry().with(filter);
    let base = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false);

    match config.format {
        LogFormat::Pretty => registry.with(base.pretty()).try_init(),
        LogFormat::Compact => registry.with(base.compact()).try_init(),
        LogFormat::Json => registry.with(base.json()).try_init(),
    }
}
