//! Logging pool monitor
//!
//! Keeps per-endpoint pool metrics current and logs every handled event
//! with the resulting `[size/checkedOut/maxSize]` snapshot attached, so a
//! log line never needs a separate metrics lookup to be understood.

use std::sync::Arc;

use poolscope_core::{
    CheckoutFailedReason, ConnectionClosedReason, ConnectionId, Endpoint, PoolSettings,
};

use super::handler::PoolEventListener;
use crate::config::MonitorConfig;
use crate::metrics::{PoolMetricsRegistry, PoolSnapshot};
use crate::readiness::PoolCreationSignal;

/// Emit a log record carrying the endpoint and its metrics snapshot as
/// structured fields, followed by any extra fields and the message
macro_rules! pool_log {
    ($level:ident, $endpoint:expr, $snapshot:expr, $($rest:tt)+) => {
        tracing::$level!(
            endpoint = %$endpoint,
            size = $snapshot.size,
            checked_out = $snapshot.checked_out,
            max_size = $snapshot.max_size,
            metrics = %$snapshot,
            $($rest)+
        )
    };
}

/// A pool listener that tracks per-endpoint metrics and logs each event
///
/// Pool created/cleared/closed and checkout failures are always logged.
/// Connection created/closed and checkout/check-in events are logged only
/// when enabled in [`MonitorConfig`]; their metrics are tracked either way.
///
/// Each monitor owns its registry, so independently configured clients do
/// not share counters unless handed the same registry explicitly.
#[derive(Debug)]
pub struct LoggingPoolMonitor {
    config: MonitorConfig,
    registry: Arc<PoolMetricsRegistry>,
    creation_signal: Option<PoolCreationSignal>,
}

impl LoggingPoolMonitor {
    /// Create a monitor that logs every event kind
    pub fn new() -> Self {
        Self::with_config(MonitorConfig::default())
    }

    /// Create a monitor with custom verbosity
    pub fn with_config(config: MonitorConfig) -> Self {
        Self::with_registry(config, Arc::new(PoolMetricsRegistry::new()))
    }

    /// Create a monitor that records into an existing registry
    pub fn with_registry(config: MonitorConfig, registry: Arc<PoolMetricsRegistry>) -> Self {
        Self {
            config,
            registry,
            creation_signal: None,
        }
    }

    /// Builder method: notify `signal` whenever a pool is created or closed
    pub fn with_creation_signal(mut self, signal: PoolCreationSignal) -> Self {
        self.creation_signal = Some(signal);
        self
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Get the metrics registry
    pub fn registry(&self) -> &Arc<PoolMetricsRegistry> {
        &self.registry
    }

    /// Get the current snapshot for an endpoint
    pub fn snapshot(&self, endpoint: &Endpoint) -> Option<PoolSnapshot> {
        self.registry.snapshot(endpoint)
    }

    /// Sum of open connections across all pools
    pub fn total_pool_size(&self) -> u64 {
        self.registry.total_pool_size()
    }

    /// Sum of checked-out connections across all pools
    pub fn total_checked_out(&self) -> u64 {
        self.registry.total_checked_out()
    }
}

impl Default for LoggingPoolMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolEventListener for LoggingPoolMonitor {
    fn pool_created(&self, endpoint: &Endpoint, settings: &PoolSettings) {
        let metrics = self.registry.get_or_create(endpoint);
        metrics.apply_settings(settings);
        let snapshot = metrics.snapshot();

        pool_log!(
            info,
            endpoint,
            snapshot,
            min_size = settings.min_size(),
            "Pool created for {} [max: {}]",
            endpoint,
            snapshot.max_size
        );

        if let Some(signal) = &self.creation_signal {
            signal.notify_created(endpoint, *settings);
        }
    }

    fn pool_ready(&self, endpoint: &Endpoint) {
        tracing::debug!(endpoint = %endpoint, "Pool ready for {}", endpoint);
    }

    fn pool_cleared(&self, endpoint: &Endpoint) {
        let metrics = self.registry.get_or_create(endpoint);
        metrics.reset();
        let snapshot = metrics.snapshot();

        pool_log!(warn, endpoint, snapshot, "Pool cleared for {} {}", endpoint, snapshot);
    }

    fn pool_closed(&self, endpoint: &Endpoint) {
        match self.registry.get(endpoint) {
            Some(metrics) => {
                let snapshot = metrics.snapshot();
                pool_log!(
                    info,
                    endpoint,
                    snapshot,
                    "Pool closed for {} [final state: size={}, checkedOut={}]",
                    endpoint,
                    snapshot.size,
                    snapshot.checked_out
                );
                self.registry.remove(endpoint);
            }
            None => {
                tracing::info!(endpoint = %endpoint, "Pool closed for {} (untracked)", endpoint);
            }
        }

        if let Some(signal) = &self.creation_signal {
            signal.notify_closed(endpoint);
        }
    }

    fn connection_created(&self, connection_id: &ConnectionId) {
        let endpoint = &connection_id.endpoint;
        let metrics = self.registry.get_or_create(endpoint);
        metrics.increment_size();

        if self.config.log_connection_events {
            let snapshot = metrics.snapshot();
            pool_log!(
                info,
                endpoint,
                snapshot,
                connection_id = connection_id.local_value,
                "Connection created #{} for {} {}",
                connection_id.local_value,
                endpoint,
                snapshot
            );
        }
    }

    fn connection_ready(&self, _connection_id: &ConnectionId) {
        // Already counted at creation
    }

    fn connection_closed(
        &self,
        connection_id: &ConnectionId,
        reason: Option<&ConnectionClosedReason>,
    ) {
        let endpoint = &connection_id.endpoint;
        let Some(metrics) = self.registry.get(endpoint) else {
            tracing::trace!(
                endpoint = %endpoint,
                connection_id = connection_id.local_value,
                "dropping connection closed event for untracked pool"
            );
            return;
        };
        metrics.decrement_size();

        if self.config.log_connection_events {
            let snapshot = metrics.snapshot();
            let reason_suffix = reason
                .map(|reason| format!(" reason: {}", reason))
                .unwrap_or_default();
            pool_log!(
                info,
                endpoint,
                snapshot,
                connection_id = connection_id.local_value,
                reason = reason.map(tracing::field::display),
                "Connection closed #{} for {}{} {}",
                connection_id.local_value,
                endpoint,
                reason_suffix,
                snapshot
            );
        }
    }

    fn checkout_started(&self, endpoint: &Endpoint) {
        let metrics = self.registry.get_or_create(endpoint);

        if self.config.log_checkout_events {
            let snapshot = metrics.snapshot();
            pool_log!(info, endpoint, snapshot, "Checkout started for {} {}", endpoint, snapshot);
        }
    }

    fn checked_out(&self, connection_id: &ConnectionId) {
        let endpoint = &connection_id.endpoint;
        let metrics = self.registry.get_or_create(endpoint);
        metrics.increment_checked_out();

        if self.config.log_checkout_events {
            let snapshot = metrics.snapshot();
            pool_log!(
                info,
                endpoint,
                snapshot,
                connection_id = connection_id.local_value,
                "Connection checked out #{} for {} {}",
                connection_id.local_value,
                endpoint,
                snapshot
            );
        }
    }

    fn checkout_failed(&self, endpoint: &Endpoint, reason: Option<&CheckoutFailedReason>) {
        let snapshot = self.registry.get_or_create(endpoint).snapshot();
        let reason_text = reason
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown reason".to_string());

        pool_log!(
            warn,
            endpoint,
            snapshot,
            reason = %reason_text,
            "Checkout FAILED for {}: {} {}",
            endpoint,
            reason_text,
            snapshot
        );
    }

    fn checked_in(&self, connection_id: &ConnectionId) {
        let endpoint = &connection_id.endpoint;
        let Some(metrics) = self.registry.get(endpoint) else {
            tracing::trace!(
                endpoint = %endpoint,
                connection_id = connection_id.local_value,
                "dropping checked in event for untracked pool"
            );
            return;
        };
        metrics.decrement_checked_out();

        if self.config.log_checkout_events {
            let snapshot = metrics.snapshot();
            pool_log!(
                info,
                endpoint,
                snapshot,
                connection_id = connection_id.local_value,
                "Connection checked in #{} for {} {}",
                connection_id.local_value,
                endpoint,
                snapshot
            );
        }
    }
}
