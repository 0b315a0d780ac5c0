//! Waiting for pool creation
//!
//! Some callers want a pool's configured maximum before issuing their first
//! operation. The listener only records creation here; any blocking happens
//! on the caller's thread, never on the thread delivering events.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use poolscope_core::{Endpoint, PoolSettings, PoolscopeError, Result};

#[derive(Debug, Default)]
struct SignalState {
    created: Mutex<HashMap<Endpoint, PoolSettings>>,
    condvar: Condvar,
}

/// Shared record of which pools have been created
///
/// Clones share state, so one handle can be given to the listener and
/// another kept by the waiting caller.
#[derive(Debug, Clone, Default)]
pub struct PoolCreationSignal {
    state: Arc<SignalState>,
}

impl PoolCreationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a pool was created and wake all waiters
    pub fn notify_created(&self, endpoint: &Endpoint, settings: PoolSettings) {
        self.state
            .created
            .lock()
            .insert(endpoint.clone(), settings);
        self.state.condvar.notify_all();
    }

    /// Forget a pool that was closed
    pub fn notify_closed(&self, endpoint: &Endpoint) {
        self.state.created.lock().remove(endpoint);
    }

    /// Check if a pool currently exists for `endpoint`
    pub fn is_created(&self, endpoint: &Endpoint) -> bool {
        self.state.created.lock().contains_key(endpoint)
    }

    /// Block until the pool for `endpoint` is created, returning its settings
    pub fn wait_for(&self, endpoint: &Endpoint, timeout: Duration) -> Result<PoolSettings> {
        self.wait_until(timeout, |created| created.get(endpoint).copied())
            .ok_or_else(|| {
                PoolscopeError::Timeout(format!(
                    "pool for {} not created within {:?}",
                    endpoint, timeout
                ))
            })
    }

    /// Block until any pool is created, returning its endpoint and settings
    pub fn wait_any(&self, timeout: Duration) -> Result<(Endpoint, PoolSettings)> {
        self.wait_until(timeout, |created| {
            created
                .iter()
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(endpoint, settings)| (endpoint.clone(), *settings))
        })
        .ok_or_else(|| {
            PoolscopeError::Timeout(format!("no pool created within {:?}", timeout))
        })
    }

    fn wait_until<T, F>(&self, timeout: Duration, check: F) -> Option<T>
    where
        F: Fn(&HashMap<Endpoint, PoolSettings>) -> Option<T>,
    {
        // A timeout too large to represent as an Instant means no deadline.
        let deadline = Instant::now().checked_add(timeout);
        let mut created = self.state.created.lock();
        loop {
            if let Some(found) = check(&created) {
                return Some(found);
            }
            match deadline {
                Some(deadline) => {
                    if self
                        .state
                        .condvar
                        .wait_until(&mut created, deadline)
                        .timed_out()
                    {
                        return check(&created);
                    }
                }
                None => self.state.condvar.wait(&mut created),
            }
        }
    }
}
