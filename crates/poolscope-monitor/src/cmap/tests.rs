//! Tests for converting driver CMAP events

use super::*;
use crate::listener::LoggingPoolMonitor;
use crate::metrics::PoolSnapshot;
use mongodb::event::cmap::PoolCreatedEvent;
use pretty_assertions::assert_eq;

fn tcp(host: &str, port: Option<u16>) -> ServerAddress {
    ServerAddress::Tcp {
        host: host.to_string(),
        port,
    }
}

fn pool_created_without_options(address: ServerAddress) -> CmapEvent {
    let mut event: PoolCreatedEvent = serde_json::from_str("{}").unwrap();
    event.address = address;
    CmapEvent::PoolCreated(event)
}

#[test]
fn test_endpoint_keeps_explicit_port() {
    let endpoint = endpoint_from(&tcp("db1.example.com", Some(27018)));
    assert_eq!(endpoint, Endpoint::new("db1.example.com", 27018));
}

#[test]
fn test_endpoint_defaults_missing_port() {
    let endpoint = endpoint_from(&tcp("db1.example.com", None));
    assert_eq!(endpoint.host(), "db1.example.com");
    assert_eq!(endpoint.port(), DEFAULT_PORT);
    assert_eq!(endpoint.to_string(), "db1.example.com:27017");
}

#[test]
fn test_closed_reason_mapping() {
    assert_eq!(closed_reason(&DriverClosedReason::Stale), ConnectionClosedReason::Stale);
    assert_eq!(closed_reason(&DriverClosedReason::Idle), ConnectionClosedReason::Idle);
    assert_eq!(closed_reason(&DriverClosedReason::Error), ConnectionClosedReason::Error);
    assert_eq!(
        closed_reason(&DriverClosedReason::PoolClosed),
        ConnectionClosedReason::PoolClosed
    );
    assert_eq!(
        closed_reason(&DriverClosedReason::Dropped),
        ConnectionClosedReason::Other("dropped".to_string())
    );
}

#[test]
fn test_checkout_failed_reason_mapping() {
    assert_eq!(
        checkout_failed_reason(&DriverCheckoutFailedReason::Timeout),
        CheckoutFailedReason::Timeout
    );
    assert_eq!(
        checkout_failed_reason(&DriverCheckoutFailedReason::ConnectionError),
        CheckoutFailedReason::ConnectionError
    );
}

#[test]
fn test_pool_created_without_options_uses_driver_default() {
    let event = pool_event_from_cmap(pool_created_without_options(tcp("db1.example.com", None)));

    assert_eq!(
        event,
        Some(PoolEvent::PoolCreated {
            endpoint: Endpoint::new("db1.example.com", 27017),
            settings: PoolSettings::new(DRIVER_DEFAULT_MAX_POOL_SIZE),
        })
    );
}

#[test]
fn test_converted_event_drives_monitor() {
    let monitor = LoggingPoolMonitor::new();
    let event = pool_event_from_cmap(pool_created_without_options(tcp("db1.example.com", None)))
        .unwrap();
    monitor.on_event(&event);

    assert_eq!(
        monitor.snapshot(&Endpoint::new("db1.example.com", 27017)),
        Some(PoolSnapshot::new(0, 0, 10))
    );
}
