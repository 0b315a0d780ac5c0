//! Connection pool lifecycle events
//!
//! These mirror the notifications a database client's connection manager
//! raises from its own threads: pool lifecycle, connection lifecycle, and
//! the checkout/check-in cycle. The monitor consumes them; it never
//! produces or reorders them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Endpoint, PoolSettings};

/// Identity of a single pooled connection
///
/// `local_value` is the serial number the client assigns within one pool,
/// so it is only unique together with the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId {
    pub endpoint: Endpoint,
    pub local_value: u32,
}

impl ConnectionId {
    pub fn new(endpoint: Endpoint, local_value: u32) -> Self {
        Self {
            endpoint,
            local_value,
        }
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.local_value, self.endpoint)
    }
}

/// Why a pooled connection was closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionClosedReason {
    /// The pool was cleared after the connection was created
    Stale,
    /// The connection sat idle past the client's idle limit
    Idle,
    /// A network or protocol error made the connection unusable
    Error,
    /// The owning pool was closed
    PoolClosed,
    /// Any reason the client reports that has no dedicated variant
    Other(String),
}

impl fmt::Display for ConnectionClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionClosedReason::Stale => f.write_str("stale"),
            ConnectionClosedReason::Idle => f.write_str("idle"),
            ConnectionClosedReason::Error => f.write_str("error"),
            ConnectionClosedReason::PoolClosed => f.write_str("pool closed"),
            ConnectionClosedReason::Other(reason) => f.write_str(reason),
        }
    }
}

/// Why a checkout request did not yield a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutFailedReason {
    /// The pool was closed while the request waited
    PoolClosed,
    /// No connection became available within the wait queue timeout
    Timeout,
    /// Establishing a new connection for the request failed
    ConnectionError,
    /// Any reason the client reports that has no dedicated variant
    Other(String),
}

impl fmt::Display for CheckoutFailedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutFailedReason::PoolClosed => f.write_str("pool closed"),
            CheckoutFailedReason::Timeout => f.write_str("timeout"),
            CheckoutFailedReason::ConnectionError => f.write_str("connection error"),
            CheckoutFailedReason::Other(reason) => f.write_str(reason),
        }
    }
}

/// A connection pool lifecycle notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A pool was created for an endpoint
    PoolCreated {
        endpoint: Endpoint,
        settings: PoolSettings,
    },
    /// A pool became ready to hand out connections
    PoolReady { endpoint: Endpoint },
    /// A pool discarded all of its connections, usually after a network error
    PoolCleared { endpoint: Endpoint },
    /// A pool was shut down
    PoolClosed { endpoint: Endpoint },
    /// A connection was created and counts against the pool
    ConnectionCreated { connection_id: ConnectionId },
    /// A connection finished its handshake and is usable
    ConnectionReady { connection_id: ConnectionId },
    /// A connection was closed and left the pool
    ConnectionClosed {
        connection_id: ConnectionId,
        reason: Option<ConnectionClosedReason>,
    },
    /// A caller started waiting for a connection
    CheckoutStarted { endpoint: Endpoint },
    /// A caller received a connection
    CheckedOut { connection_id: ConnectionId },
    /// A caller gave up waiting for a connection
    CheckoutFailed {
        endpoint: Endpoint,
        reason: Option<CheckoutFailedReason>,
    },
    /// A caller returned a connection to the pool
    CheckedIn { connection_id: ConnectionId },
}

impl PoolEvent {
    /// The endpoint whose pool this event concerns
    pub fn endpoint(&self) -> &Endpoint {
        match self {
            PoolEvent::PoolCreated { endpoint, .. }
            | PoolEvent::PoolReady { endpoint }
            | PoolEvent::PoolCleared { endpoint }
            | PoolEvent::PoolClosed { endpoint }
            | PoolEvent::CheckoutStarted { endpoint }
            | PoolEvent::CheckoutFailed { endpoint, .. } => endpoint,
            PoolEvent::ConnectionCreated { connection_id }
            | PoolEvent::ConnectionReady { connection_id }
            | PoolEvent::ConnectionClosed { connection_id, .. }
            | PoolEvent::CheckedOut { connection_id }
            | PoolEvent::CheckedIn { connection_id } => &connection_id.endpoint,
        }
    }

    /// Short label for the event kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            PoolEvent::PoolCreated { .. } => "pool_created",
            PoolEvent::PoolReady { .. } => "pool_ready",
            PoolEvent::PoolCleared { .. } => "pool_cleared",
            PoolEvent::PoolClosed { .. } => "pool_closed",
            PoolEvent::ConnectionCreated { .. } => "connection_created",
            PoolEvent::ConnectionReady { .. } => "connection_ready",
            PoolEvent::ConnectionClosed { .. } => "connection_closed",
            PoolEvent::CheckoutStarted { .. } => "checkout_started",
            PoolEvent::CheckedOut { .. } => "checked_out",
            PoolEvent::CheckoutFailed { .. } => "checkout_failed",
            PoolEvent::CheckedIn { .. } => "checked_in",
        }
    }

    /// The connection this event concerns, if it is a per-connection event
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        match self {
            PoolEvent::ConnectionCreated { connection_id }
            | PoolEvent::ConnectionReady { connection_id }
            | PoolEvent::ConnectionClosed { connection_id, .. }
            | PoolEvent::CheckedOut { connection_id }
            | PoolEvent::CheckedIn { connection_id } => Some(connection_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
