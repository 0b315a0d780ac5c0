//! Per-endpoint connection pool metrics
//!
//! This module tracks how many connections each pool holds and how many of
//! them are lent out, keyed by remote endpoint.
//!
//! # Example
//!
//! ```
//! use poolscope_core::{Endpoint, PoolSettings};
//! use poolscope_monitor::metrics::PoolMetricsRegistry;
//!
//! let registry = PoolMetricsRegistry::new();
//! let endpoint = Endpoint::new("db1.example.com", 27017);
//!
//! let metrics = registry.get_or_create(&endpoint);
//! metrics.apply_settings(&PoolSettings::new(50));
//! metrics.increment_size();
//! metrics.increment_checked_out();
//!
//! assert_eq!(metrics.snapshot().to_string(), "[1/1/50]");
//! assert_eq!(registry.total_checked_out(), 1);
//! ```

mod registry;
mod snapshot;

#[cfg(test)]
mod tests;

pub use registry::{PoolMetrics, PoolMetricsRegistry};
pub use snapshot::{PoolSnapshot, PoolStatistics};
