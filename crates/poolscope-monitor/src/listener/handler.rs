//! Listener trait for connection pool lifecycle events

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use poolscope_core::{
    CheckoutFailedReason, ConnectionClosedReason, ConnectionId, Endpoint, PoolEvent, PoolSettings,
};

/// Receives pool lifecycle notifications from a connection manager
///
/// Methods are invoked synchronously on whatever thread the connection
/// manager raises the event from, so implementations must not block.
/// Every method defaults to a no-op.
pub trait PoolEventListener: Send + Sync {
    /// A pool was created for `endpoint` with the given bounds
    fn pool_created(&self, _endpoint: &Endpoint, _settings: &PoolSettings) {}

    /// A pool is ready to hand out connections
    fn pool_ready(&self, _endpoint: &Endpoint) {}

    /// A pool dropped all of its connections
    fn pool_cleared(&self, _endpoint: &Endpoint) {}

    /// A pool was shut down
    fn pool_closed(&self, _endpoint: &Endpoint) {}

    /// A connection was created
    fn connection_created(&self, _connection_id: &ConnectionId) {}

    /// A connection completed its handshake
    fn connection_ready(&self, _connection_id: &ConnectionId) {}

    /// A connection was closed
    fn connection_closed(
        &self,
        _connection_id: &ConnectionId,
        _reason: Option<&ConnectionClosedReason>,
    ) {
    }

    /// A caller began waiting for a connection
    fn checkout_started(&self, _endpoint: &Endpoint) {}

    /// A caller received a connection
    fn checked_out(&self, _connection_id: &ConnectionId) {}

    /// A caller gave up waiting for a connection
    fn checkout_failed(&self, _endpoint: &Endpoint, _reason: Option<&CheckoutFailedReason>) {}

    /// A caller returned a connection
    fn checked_in(&self, _connection_id: &ConnectionId) {}

    /// Dispatch an event to the matching method
    ///
    /// A panic inside a handler is caught and reported at debug level so it
    /// never unwinds into the connection manager that raised the event.
    fn on_event(&self, event: &PoolEvent) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatch(self, event)));
        if let Err(payload) = outcome {
            tracing::debug!(
                kind = event.kind(),
                endpoint = %event.endpoint(),
                panic = panic_message(payload.as_ref()),
                "pool event handler panicked, event dropped"
            );
        }
    }
}

fn dispatch<L: PoolEventListener + ?Sized>(listener: &L, event: &PoolEvent) {
    match event {
        PoolEvent::PoolCreated { endpoint, settings } => listener.pool_created(endpoint, settings),
        PoolEvent::PoolReady { endpoint } => listener.pool_ready(endpoint),
        PoolEvent::PoolCleared { endpoint } => listener.pool_cleared(endpoint),
        PoolEvent::PoolClosed { endpoint } => listener.pool_closed(endpoint),
        PoolEvent::ConnectionCreated { connection_id } => {
            listener.connection_created(connection_id)
        }
        PoolEvent::ConnectionReady { connection_id } => listener.connection_ready(connection_id),
        PoolEvent::ConnectionClosed {
            connection_id,
            reason,
        } => listener.connection_closed(connection_id, reason.as_ref()),
        PoolEvent::CheckoutStarted { endpoint } => listener.checkout_started(endpoint),
        PoolEvent::CheckedOut { connection_id } => listener.checked_out(connection_id),
        PoolEvent::CheckoutFailed { endpoint, reason } => {
            listener.checkout_failed(endpoint, reason.as_ref())
        }
        PoolEvent::CheckedIn { connection_id } => listener.checked_in(connection_id),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

impl<T: PoolEventListener + ?Sized> PoolEventListener for Arc<T> {
    fn pool_created(&self, endpoint: &Endpoint, settings: &PoolSettings) {
        (**self).pool_created(endpoint, settings)
    }

    fn pool_ready(&self, endpoint: &Endpoint) {
        (**self).pool_ready(endpoint)
    }

    fn pool_cleared(&self, endpoint: &Endpoint) {
        (**self).pool_cleared(endpoint)
    }

    fn pool_closed(&self, endpoint: &Endpoint) {
        (**self).pool_closed(endpoint)
    }

    fn connection_created(&self, connection_id: &ConnectionId) {
        (**self).connection_created(connection_id)
    }

    fn connection_ready(&self, connection_id: &ConnectionId) {
        (**self).connection_ready(connection_id)
    }

    fn connection_closed(
        &self,
        connection_id: &ConnectionId,
        reason: Option<&ConnectionClosedReason>,
    ) {
        (**self).connection_closed(connection_id, reason)
    }

    fn checkout_started(&self, endpoint: &Endpoint) {
        (**self).checkout_started(endpoint)
    }

    fn checked_out(&self, connection_id: &ConnectionId) {
        (**self).checked_out(connection_id)
    }

    fn checkout_failed(&self, endpoint: &Endpoint, reason: Option<&CheckoutFailedReason>) {
        (**self).checkout_failed(endpoint, reason)
    }

    fn checked_in(&self, connection_id: &ConnectionId) {
        (**self).checked_in(connection_id)
    }

    fn on_event(&self, event: &PoolEvent) {
        (**self).on_event(event)
    }
}
