//! Remote endpoint identity
//!
//! A pool is keyed by the server it connects to. Clients talking to a
//! replica set or sharded cluster own one pool, and therefore one endpoint,
//! per member.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PoolscopeError, Result};

/// Port assumed when an address omits one
pub const DEFAULT_PORT: u16 = 27017;

/// The (host, port) pair identifying one pooled remote server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint from a host name (or IP literal) and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Create an endpoint on the default port
    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }

    /// Get the host name
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = PoolscopeError;

    /// Parse `host`, `host:port`, `[v6]` or `[v6]:port`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| PoolscopeError::InvalidEndpoint(format!("unclosed '[' in {s:?}")))?;
            let port = match tail {
                "" => None,
                tail => Some(tail.strip_prefix(':').ok_or_else(|| {
                    PoolscopeError::InvalidEndpoint(format!(
                        "unexpected {tail:?} after ']' in {s:?}"
                    ))
                })?),
            };
            (host, port)
        } else if s.matches(':').count() > 1 {
            // Bare IPv6 literal, no room for a port
            (s, None)
        } else {
            match s.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (s, None),
            }
        };

        if host.is_empty() {
            return Err(PoolscopeError::InvalidEndpoint(format!(
                "missing host in {s:?}"
            )));
        }

        let port = match port {
            Some(port) => port.parse::<u16>().map_err(|_| {
                PoolscopeError::InvalidEndpoint(format!("invalid port {port:?} in {s:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(host, port))
    }
}

impl From<(&str, u16)> for Endpoint {
    fn from((host, port): (&str, u16)) -> Self {
        Self::new(host, port)
    }
}
