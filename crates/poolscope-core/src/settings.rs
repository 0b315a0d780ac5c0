//! Pool settings as reported by the client on pool creation

use serde::{Deserialize, Serialize};

/// Maximum pool size used when a client reports none
pub const DEFAULT_MAX_POOL_SIZE: u32 = 100;

/// Configured bounds of a connection pool
///
/// Carried by the pool-created event. The monitor never enforces these;
/// it only records them next to the live counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Minimum number of connections the client keeps open
    min_size: u32,
    /// Maximum number of connections the client allows
    max_size: u32,
}

impl PoolSettings {
    /// Create settings with the given maximum and no minimum
    pub fn new(max_size: u32) -> Self {
        Self {
            min_size: 0,
            max_size,
        }
    }

    /// Set the minimum pool size
    ///
    /// Clamped to the maximum so a misreported minimum cannot exceed it.
    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size.min(self.max_size);
        self
    }

    /// Get the minimum pool size
    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    /// Get the maximum pool size
    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

impl Default for PoolSettings {
    /// Defaults: min_size 0, max_size 100
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POOL_SIZE)
    }
}

#[cfg(test)]
mod tests;
