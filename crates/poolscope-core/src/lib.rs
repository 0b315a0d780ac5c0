//! Poolscope Core - Vocabulary shared by the pool monitor
//!
//! This crate defines the types that describe a connection pool from the
//! outside, as seen through the lifecycle events a database client emits:
//!
//! - `Endpoint` - The (host, port) identity of one pooled server
//! - `PoolSettings` - The configured bounds of a pool
//! - `PoolEvent` - Pool, connection and checkout lifecycle notifications
//! - `PoolscopeError` - Error type for configuration and bootstrap paths

mod endpoint;
mod error;
mod event;
mod settings;

pub use endpoint::*;
pub use error::*;
pub use event::*;
pub use settings::*;
