//! Poolscope Monitor - Connection pool metrics through the logging side-channel
//!
//! This crate listens to the pool lifecycle events a database client emits
//! and keeps per-endpoint utilization current:
//! - `PoolMetricsRegistry` - Concurrent endpoint to metrics mapping
//! - `LoggingPoolMonitor` - Event listener that updates the registry and
//!   logs each event with a `[size/checkedOut/maxSize]` snapshot
//! - `MonitorConfig` - Verbosity flags, from TOML or the environment
//! - `PoolCreationSignal` - Optional wait for a pool's creation
//! - `logging` - Subscriber bootstrap for applications without one

#[cfg(feature = "mongodb")]
pub mod cmap;
mod config;
pub mod listener;
pub mod logging;
pub mod metrics;
mod readiness;

pub use config::{ENV_LOG_CHECKOUT_EVENTS, ENV_LOG_CONNECTION_EVENTS, MonitorConfig};
pub use listener::{LoggingPoolMonitor, PoolEventListener};
pub use logging::{LogFormat, LoggingConfig};
pub use metrics::{PoolMetrics, PoolMetricsRegistry, PoolSnapshot, PoolStatistics};
pub use readiness::PoolCreationSignal;
