//! Key-value store configuration

use crate::constants::*;
use kvlock_providers::RedisConnectionSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Key-value store backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Networked store shared by every process (Redis)
    Redis,
    /// Process-local store, for tests and single-process use
    Memory,
}

impl StoreProvider {
    /// Every supported backend
    pub const ALL: [StoreProvider; 2] = [StoreProvider::Redis, StoreProvider::Memory];

    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreProvider::Redis => "redis",
            StoreProvider::Memory => "memory",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            StoreProvider::Redis => "Redis server; locks are shared across processes and hosts",
            StoreProvider::Memory => "In-process map; locks are visible to this process only",
        }
    }
}

impl fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store backend
    pub provider: StoreProvider,

    /// Connection URL (Redis only)
    pub uri: String,

    /// Timeout for one connect attempt in milliseconds (Redis only)
    pub connection_timeout_ms: u64,

    /// Timeout for one command reply in milliseconds (Redis only)
    pub response_timeout_ms: u64,

    /// Reconnect attempts after a failed connect (Redis only)
    pub connection_retries: usize,
}

impl StoreConfig {
    /// Redis connection timing derived from this configuration
    pub fn redis_settings(&self) -> RedisConnectionSettings {
        RedisConnectionSettings {
            connection_timeout: Duration::from_millis(self.connection_timeout_ms),
            response_timeout: Duration::from_millis(self.response_timeout_ms),
            connection_retries: self.connection_retries,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::Redis,
            uri: DEFAULT_REDIS_URI.to_string(),
            connection_timeout_ms: DEFAULT_REDIS_CONNECTION_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_REDIS_RESPONSE_TIMEOUT_MS,
            connection_retries: DEFAULT_REDIS_CONNECTION_RETRIES,
        }
    }
}
