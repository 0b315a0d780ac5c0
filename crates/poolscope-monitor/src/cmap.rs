//! Bridge from the MongoDB Rust driver's CMAP events
//!
//! Install the monitor on a client with:
//!
//! ```ignore
//! use std::sync::Arc;
//! use mongodb::{Client, options::ClientOptions};
//! use poolscope_monitor::{LoggingPoolMonitor, cmap::cmap_event_handler};
//!
//! let monitor = Arc::new(LoggingPoolMonitor::new());
//! let mut options = ClientOptions::parse(uri).await?;
//! options.cmap_event_handler = Some(cmap_event_handler(Arc::clone(&monitor)));
//! let client = Client::with_options(options)?;
//! ```

use std::sync::Arc;

use mongodb::event::EventHandler;
use mongodb::event::cmap::{
    CmapEvent, ConnectionCheckoutFailedReason as DriverCheckoutFailedReason,
    ConnectionClosedReason as DriverClosedReason,
};
use mongodb::options::ServerAddress;
use poolscope_core::{
    CheckoutFailedReason, ConnectionClosedReason, ConnectionId, DEFAULT_PORT, Endpoint, PoolEvent,
    PoolSettings,
};

use crate::listener::PoolEventListener;

/// Maximum pool size the driver applies when none is configured
pub const DRIVER_DEFAULT_MAX_POOL_SIZE: u32 = 10;

/// Build a driver event handler that feeds every CMAP event to `listener`
pub fn cmap_event_handler<L>(listener: Arc<L>) -> EventHandler<CmapEvent>
where
    L: PoolEventListener + 'static,
{
    EventHandler::callback(move |event: CmapEvent| {
        if let Some(event) = pool_event_from_cmap(event) {
            listener.on_event(&event);
        }
    })
}

/// Convert a driver CMAP event, or `None` for kinds the monitor does not know
pub fn pool_event_from_cmap(event: CmapEvent) -> Option<PoolEvent> {
    let event = match event {
        CmapEvent::PoolCreated(e) => {
            let (max_size, min_size) = e
                .options
                .as_ref()
                .map(|o| (o.max_pool_size, o.min_pool_size))
                .unwrap_or((None, None));
            PoolEvent::PoolCreated {
                endpoint: endpoint_from(&e.address),
                settings: PoolSettings::new(max_size.unwrap_or(DRIVER_DEFAULT_MAX_POOL_SIZE))
                    .with_min_size(min_size.unwrap_or(0)),
            }
        }
        CmapEvent::PoolReady(e) => PoolEvent::PoolReady {
            endpoint: endpoint_from(&e.address),
        },
        CmapEvent::PoolCleared(e) => PoolEvent::PoolCleared {
            endpoint: endpoint_from(&e.address),
        },
        CmapEvent::PoolClosed(e) => PoolEvent::PoolClosed {
            endpoint: endpoint_from(&e.address),
        },
        CmapEvent::ConnectionCreated(e) => PoolEvent::ConnectionCreated {
            connection_id: ConnectionId::new(endpoint_from(&e.address), e.connection_id),
        },
        CmapEvent::ConnectionReady(e) => PoolEvent::ConnectionReady {
            connection_id: ConnectionId::new(endpoint_from(&e.address), e.connection_id),
        },
        CmapEvent::ConnectionClosed(e) => PoolEvent::ConnectionClosed {
            connection_id: ConnectionId::new(endpoint_from(&e.address), e.connection_id),
            reason: Some(closed_reason(&e.reason)),
        },
        CmapEvent::ConnectionCheckoutStarted(e) => PoolEvent::CheckoutStarted {
            endpoint: endpoint_from(&e.address),
        },
        CmapEvent::ConnectionCheckoutFailed(e) => PoolEvent::CheckoutFailed {
            endpoint: endpoint_from(&e.address),
            reason: Some(checkout_failed_reason(&e.reason)),
        },
        CmapEvent::ConnectionCheckedOut(e) => PoolEvent::CheckedOut {
            connection_id: ConnectionId::new(endpoint_from(&e.address), e.connection_id),
        },
        CmapEvent::ConnectionCheckedIn(e) => PoolEvent::CheckedIn {
            connection_id: ConnectionId::new(endpoint_from(&e.address), e.connection_id),
        },
        other => {
            tracing::trace!(event = ?other, "ignoring unrecognised CMAP event");
            return None;
        }
    };
    Some(event)
}

fn endpoint_from(address: &ServerAddress) -> Endpoint {
    match address {
        ServerAddress::Tcp { host, port } => {
            Endpoint::new(host.clone(), port.unwrap_or(DEFAULT_PORT))
        }
        // Unix sockets have no port; keep the path as the host
        other => Endpoint::new(other.to_string(), 0),
    }
}

fn closed_reason(reason: &DriverClosedReason) -> ConnectionClosedReason {
    match reason {
        DriverClosedReason::Stale => ConnectionClosedReason::Stale,
        DriverClosedReason::Idle => ConnectionClosedReason::Idle,
        DriverClosedReason::Error => ConnectionClosedReason::Error,
        DriverClosedReason::PoolClosed => ConnectionClosedReason::PoolClosed,
        other => ConnectionClosedReason::Other(format!("{:?}", other).to_lowercase()),
    }
}

fn checkout_failed_reason(reason: &DriverCheckoutFailedReason) -> CheckoutFailedReason {
    match reason {
        DriverCheckoutFailedReason::Timeout => CheckoutFailedReason::Timeout,
        DriverCheckoutFailedReason::ConnectionError => CheckoutFailedReason::ConnectionError,
        other => CheckoutFailedReason::Other(format!("{:?}", other).to_lowercase()),
    }
}

#[cfg(test)]
mod tests;
