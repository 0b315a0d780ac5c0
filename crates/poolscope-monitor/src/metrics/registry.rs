//! Concurrent registry of per-endpoint pool metrics

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use poolscope_core::{Endpoint, PoolSettings};

use super::snapshot::{PoolSnapshot, PoolStatistics};

/// Live counters for one endpoint's pool
///
/// Every mutation is a single atomic operation. Decrements saturate at zero
/// so out-of-order or duplicated events can never drive a counter negative.
#[derive(Debug, Default)]
pub struct PoolMetrics {
    /// Connections currently open (created minus closed)
    size: AtomicU32,
    /// Connections currently lent out (checked out minus checked in)
    checked_out: AtomicU32,
    /// Configured maximum, 0 until the pool-created event arrives
    max_size: AtomicU32,
    /// Configured minimum
    min_size: AtomicU32,
}

impl PoolMetrics {
    /// Create zero-valued metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of open connections
    pub fn size(&self) -> u32 {
        self.size.load(Ordering::SeqCst)
    }

    /// Get the number of checked-out connections
    pub fn checked_out(&self) -> u32 {
        self.checked_out.load(Ordering::SeqCst)
    }

    /// Get the configured maximum pool size
    pub fn max_size(&self) -> u32 {
        self.max_size.load(Ordering::SeqCst)
    }

    /// Get the configured minimum pool size
    pub fn min_size(&self) -> u32 {
        self.min_size.load(Ordering::SeqCst)
    }

    /// Record the pool's configured bounds
    pub fn apply_settings(&self, settings: &PoolSettings) {
        self.max_size.store(settings.max_size(), Ordering::SeqCst);
        self.min_size.store(settings.min_size(), Ordering::SeqCst);
    }

    /// Count a newly created connection, returning the new size
    pub fn increment_size(&self) -> u32 {
        self.size.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Count a closed connection, returning the new size
    pub fn decrement_size(&self) -> u32 {
        saturating_decrement(&self.size)
    }

    /// Count a checkout, returning the new checked-out count
    pub fn increment_checked_out(&self) -> u32 {
        self.checked_out.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Count a check-in, returning the new checked-out count
    pub fn decrement_checked_out(&self) -> u32 {
        saturating_decrement(&self.checked_out)
    }

    /// Drop size and checked-out counts to zero, keeping the configured bounds
    pub fn reset(&self) {
        self.size.store(0, Ordering::SeqCst);
        self.checked_out.store(0, Ordering::SeqCst);
    }

    /// Read all counters
    ///
    /// Each field is read atomically but the triple is not captured under a
    /// lock, so a concurrent event may land between reads.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            size: self.size(),
            checked_out: self.checked_out(),
            max_size: self.max_size(),
            min_size: self.min_size(),
        }
    }
}

fn saturating_decrement(counter: &AtomicU32) -> u32 {
    match counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_sub(1)) {
        Ok(previous) => previous - 1,
        Err(_) => 0,
    }
}

/// Registry mapping each remote endpoint to its pool metrics
///
/// Backed by a sharded concurrent map, so updates for unrelated endpoints
/// never contend on a single lock. Records are shared out as `Arc`s; a
/// record removed while another thread still holds it simply stops being
/// reachable through the registry.
#[derive(Debug, Default)]
pub struct PoolMetricsRegistry {
    pools: DashMap<Endpoint, Arc<PoolMetrics>>,
}

impl PoolMetricsRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record for `endpoint`, inserting a zero-valued one if absent
    ///
    /// Insert-or-fetch happens under the endpoint's shard lock, so threads
    /// racing on the same endpoint all receive the same record.
    pub fn get_or_create(&self, endpoint: &Endpoint) -> Arc<PoolMetrics> {
        if let Some(metrics) = self.pools.get(endpoint) {
            return Arc::clone(metrics.value());
        }

        let entry = self
            .pools
            .entry(endpoint.clone())
            .or_insert_with(|| Arc::new(PoolMetrics::new()));
        Arc::clone(entry.value())
    }

    /// Get the record for `endpoint` without creating one
    pub fn get(&self, endpoint: &Endpoint) -> Option<Arc<PoolMetrics>> {
        self.pools.get(endpoint).map(|m| Arc::clone(m.value()))
    }

    /// Remove and return the record for `endpoint`
    pub fn remove(&self, endpoint: &Endpoint) -> Option<Arc<PoolMetrics>> {
        self.pools.remove(endpoint).map(|(_, metrics)| metrics)
    }

    /// Check if a record exists for `endpoint`
    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.pools.contains_key(endpoint)
    }

    /// Snapshot a single endpoint
    pub fn snapshot(&self, endpoint: &Endpoint) -> Option<PoolSnapshot> {
        self.pools.get(endpoint).map(|m| m.snapshot())
    }

    /// Snapshot every tracked endpoint, ordered by endpoint
    ///
    /// Consistency is per record only; no global lock is taken.
    pub fn snapshot_all(&self) -> Vec<(Endpoint, PoolSnapshot)> {
        let mut snapshots: Vec<_> = self
            .pools
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect();
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));
        snapshots
    }

    /// Statistics view for a single endpoint
    pub fn statistics(&self, endpoint: &Endpoint) -> Option<PoolStatistics> {
        self.snapshot(endpoint)
            .map(|snapshot| PoolStatistics::new(endpoint, snapshot))
    }

    /// Sum of open connections across all tracked endpoints
    pub fn total_pool_size(&self) -> u64 {
        self.pools.iter().map(|entry| entry.size() as u64).sum()
    }

    /// Sum of checked-out connections across all tracked endpoints
    pub fn total_checked_out(&self) -> u64 {
        self.pools
            .iter()
            .map(|entry| entry.checked_out() as u64)
            .sum()
    }

    /// Number of tracked endpoints
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if no endpoint is tracked
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
