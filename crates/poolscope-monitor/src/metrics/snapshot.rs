//! Point-in-time views of pool metrics

use std::fmt;

use poolscope_core::Endpoint;
use serde::{Deserialize, Serialize};

/// The (size, checked out, max size) triple for one pool
///
/// Displays as `[size/checkedOut/maxSize]`, the form embedded in every
/// monitor log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Connections currently open
    pub size: u32,
    /// Connections currently lent out to callers
    pub checked_out: u32,
    /// Configured upper bound, 0 until the pool-created event is seen
    pub max_size: u32,
    /// Configured lower bound
    pub min_size: u32,
}

impl PoolSnapshot {
    /// Create a snapshot with no minimum size
    pub fn new(size: u32, checked_out: u32, max_size: u32) -> Self {
        Self {
            size,
            checked_out,
            max_size,
            min_size: 0,
        }
    }

    /// Number of open connections not lent out
    ///
    /// Saturates at 0 when racing events briefly push checked_out past size.
    pub fn available(&self) -> u32 {
        self.size.saturating_sub(self.checked_out)
    }

    /// Fraction of the configured maximum currently checked out (0.0 to 1.0)
    ///
    /// Returns 0.0 while the maximum is unknown.
    pub fn utilization(&self) -> f64 {
        if self.max_size == 0 {
            0.0
        } else {
            (self.checked_out as f64 / self.max_size as f64).min(1.0)
        }
    }

    /// Check if every allowed connection is checked out
    pub fn is_saturated(&self) -> bool {
        self.max_size > 0 && self.checked_out >= self.max_size
    }
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}/{}]", self.size, self.checked_out, self.max_size)
    }
}

/// Statistics for one pool, suitable for an external reporting surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatistics {
    pub host: String,
    pub port: u16,
    pub min_size: u32,
    pub max_size: u32,
    pub size: u32,
    pub checked_out: u32,
}

impl PoolStatistics {
    pub fn new(endpoint: &Endpoint, snapshot: PoolSnapshot) -> Self {
        Self {
            host: endpoint.host().to_string(),
            port: endpoint.port(),
            min_size: snapshot.min_size,
            max_size: snapshot.max_size,
            size: snapshot.size,
            checked_out: snapshot.checked_out,
        }
    }
}
