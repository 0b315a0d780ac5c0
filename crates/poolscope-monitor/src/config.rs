//! Monitor configuration
//!
//! Verbosity flags for the logging listener, loadable from TOML and
//! overridable from the environment.

use std::path::Path;

use poolscope_core::{PoolscopeError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `log_connection_events`
pub const ENV_LOG_CONNECTION_EVENTS: &str = "POOLSCOPE_LOG_CONNECTION_EVENTS";
/// Environment variable overriding `log_checkout_events`
pub const ENV_LOG_CHECKOUT_EVENTS: &str = "POOLSCOPE_LOG_CHECKOUT_EVENTS";

/// Configuration for the logging pool monitor
///
/// Pool lifecycle transitions and checkout failures are always logged;
/// these flags only control the high-volume per-connection events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Log connection created/closed events
    pub log_connection_events: bool,
    /// Log checkout started/checked out/checked in events
    pub log_checkout_events: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_connection_events: true,
            log_checkout_events: true,
        }
    }
}

impl MonitorConfig {
    /// Create a config with explicit flags
    pub fn new(log_connection_events: bool, log_checkout_events: bool) -> Self {
        Self {
            log_connection_events,
            log_checkout_events,
        }
    }

    /// Config that logs only pool lifecycle transitions and failures
    pub fn quiet() -> Self {
        Self::new(false, false)
    }

    /// Builder method: set connection event logging
    pub fn with_connection_events(mut self, enabled: bool) -> Self {
        self.log_connection_events = enabled;
        self
    }

    /// Builder method: set checkout event logging
    pub fn with_checkout_events(mut self, enabled: bool) -> Self {
        self.log_checkout_events = enabled;
        self
    }

    /// Parse from TOML
    ///
    /// Accepts the keys either at the top level or under a `[monitor]` table.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(source)?;
        let section = match table.remove("monitor") {
            Some(toml::Value::Table(section)) => section,
            Some(other) => {
                return Err(PoolscopeError::Configuration(format!(
                    "[monitor] must be a table, found {}",
                    other.type_str()
                )));
            }
            None => table,
        };
        toml::Value::Table(section)
            .try_into::<Self>()
            .map_err(Into::into)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), ?config, "loaded monitor config");
        Ok(config)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Override flags from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Override flags from an arbitrary variable lookup
    ///
    /// Unrecognised values are ignored with a warning.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(enabled) = read_flag(&lookup, ENV_LOG_CONNECTION_EVENTS) {
            self.log_connection_events = enabled;
        }
        if let Some(enabled) = read_flag(&lookup, ENV_LOG_CHECKOUT_EVENTS) {
            self.log_checkout_events = enabled;
        }
        self
    }
}

fn read_flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match parse_flag(&raw) {
        Some(enabled) => Some(enabled),
        None => {
            tracing::warn!(key, value = %raw, "ignoring unrecognised boolean");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
