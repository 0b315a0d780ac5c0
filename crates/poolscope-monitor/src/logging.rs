//! Logging bootstrap for applications embedding the pool monitor
//!
//! The monitor itself only emits `tracing` events. Applications that do not
//! already install a subscriber can use [`init`] to get console output in a
//! pretty, compact, or JSON format, filtered through `RUST_LOG`.

use poolscope_core::{PoolscopeError, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, human-oriented output
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per event, for log shippers
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,

    /// Filter used when RUST_LOG is not set
    pub default_filter: String,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Whether to include the emitting thread's name
    pub with_thread_names: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            default_filter: "info,poolscope_monitor=info".to_string(),
            include_location: cfg!(debug_assertions),
            with_thread_names: true,
        }
    }
}

impl LoggingConfig {
    /// Create a production configuration (JSON lines, no source locations)
    pub fn production() -> Self {
        Self {
            format: LogFormat::Json,
            default_filter: "warn,poolscope_monitor=info".to_string(),
            include_location: false,
            with_thread_names: true,
        }
    }

    /// Create a development configuration (pretty console output, verbose logging)
    pub fn development() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_filter: "debug,poolscope_monitor=trace".to_string(),
            include_location: true,
            with_thread_names: true,
        }
    }

    /// Create a testing configuration (compact, everything enabled)
    pub fn testing() -> Self {
        Self {
            format: LogFormat::Compact,
            default_filter: "trace".to_string(),
            include_location: true,
            with_thread_names: false,
        }
    }

    /// Resolve the filter, letting RUST_LOG take precedence over the default
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Install a global subscriber built from `config`
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LoggingConfig) -> Result<()> {
    let filter = config.env_filter();

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_thread_names(config.with_thread_names)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .pretty()
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_target(true)
            .with_thread_names(config.with_thread_names)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .compact()
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .with_thread_names(config.with_thread_names)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_ansi(false)
            .json()
            .with_filter(filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| PoolscopeError::Logging(e.to_string()))?;

    tracing::debug!(format = ?config.format, "logging initialized");
    Ok(())
}

/// Initialize logging with the build profile's default configuration
pub fn init_default() -> Result<()> {
    let config = if cfg!(debug_assertions) {
        LoggingConfig::development()
    } else {
        LoggingConfig::production()
    };

    init(config)
}
