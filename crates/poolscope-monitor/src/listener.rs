//! Pool event listening
//!
//! This module turns the connection manager's lifecycle callbacks into
//! registry updates and one structured log line per event.
//!
//! # Example
//!
//! ```
//! use poolscope_core::{ConnectionId, Endpoint, PoolEvent, PoolSettings};
//! use poolscope_monitor::{LoggingPoolMonitor, MonitorConfig, PoolEventListener};
//!
//! let monitor = LoggingPoolMonitor::with_config(MonitorConfig::quiet());
//! let endpoint = Endpoint::new("db1.example.com", 27017);
//!
//! monitor.on_event(&PoolEvent::PoolCreated {
//!     endpoint: endpoint.clone(),
//!     settings: PoolSettings::new(50),
//! });
//! monitor.on_event(&PoolEvent::ConnectionCreated {
//!     connection_id: ConnectionId::new(endpoint.clone(), 1),
//! });
//!
//! assert_eq!(monitor.snapshot(&endpoint).unwrap().to_string(), "[1/0/50]");
//! ```

mod handler;
mod monitor;


pub use handler::PoolEventListener;
pub use monitor::LoggingPoolMonitor;
