//! Tests for pool lifecycle events

use super::*;
use pretty_assertions::assert_eq;

fn endpoint() -> Endpoint {
    Endpoint::new("db1.example.com", 27017)
}

#[test]
fn test_endpoint_for_pool_events() {
    let event = PoolEvent::PoolCreated {
        endpoint: endpoint(),
        settings: PoolSettings::new(50),
    };
    assert_eq!(event.endpoint(), &endpoint());
    assert!(event.connection_id().is_none());

    let event = PoolEvent::CheckoutFailed {
        endpoint: endpoint(),
        reason: None,
    };
    assert_eq!(event.endpoint(), &endpoint());
}

#[test]
fn test_endpoint_for_connection_events() {
    let id = ConnectionId::new(endpoint(), 7);
    let event = PoolEvent::ConnectionClosed {
        connection_id: id.clone(),
        reason: Some(ConnectionClosedReason::Idle),
    };
    assert_eq!(event.endpoint(), &endpoint());
    assert_eq!(event.connection_id(), Some(&id));
}

#[test]
fn test_event_kinds() {
    let id = ConnectionId::new(endpoint(), 1);
    assert_eq!(
        PoolEvent::PoolCleared {
            endpoint: endpoint()
        }
        .kind(),
        "pool_cleared"
    );
    assert_eq!(
        PoolEvent::CheckedOut {
            connection_id: id.clone()
        }
        .kind(),
        "checked_out"
    );
    assert_eq!(PoolEvent::CheckedIn { connection_id: id }.kind(), "checked_in");
}

#[test]
fn test_connection_id_display() {
    let id = ConnectionId::new(endpoint(), 12);
    assert_eq!(id.to_string(), "#12@db1.example.com:27017");
}

#[test]
fn test_reason_display() {
    assert_eq!(ConnectionClosedReason::PoolClosed.to_string(), "pool closed");
    assert_eq!(
        ConnectionClosedReason::Other("handshake".into()).to_string(),
        "handshake"
    );
    assert_eq!(CheckoutFailedReason::Timeout.to_string(), "timeout");
    assert_eq!(
        CheckoutFailedReason::ConnectionError.to_string(),
        "connection error"
    );
}

#[test]
fn test_event_serialization_is_tagged() {
    let event = PoolEvent::CheckoutStarted {
        endpoint: endpoint(),
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"kind\":\"checkout_started\""));

    let deserialized: PoolEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, event);
}
