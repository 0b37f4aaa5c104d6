//! Lock defaults

use crate::constants::{DEFAULT_LOCK_TIMEOUT_MS, DEFAULT_LOCK_TTL_MS};
use serde::{Deserialize, Serialize};

/// Default lock timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// How long an acquired lock lives without release
    pub default_ttl_ms: u64,

    /// How long an acquisition waits before giving up
    pub default_timeout_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_LOCK_TTL_MS,
            default_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }
}
