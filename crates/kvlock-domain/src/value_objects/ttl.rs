//! Remaining time-to-live of a store key

use crate::constants::{TTL_MISSING, TTL_PERSISTENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remaining lifetime reported by the store for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "secs")]
pub enum KeyTtl {
    /// The key expires after this many seconds
    Expires(u64),
    /// The key exists and never expires
    Persistent,
    /// The key does not exist
    Missing,
}

impl KeyTtl {
    /// Decode a raw `TTL` reply
    pub fn from_reply(reply: i64) -> Self {
        match reply {
            TTL_PERSISTENT => Self::Persistent,
            TTL_MISSING => Self::Missing,
            secs if secs >= 0 => Self::Expires(secs.unsigned_abs()),
            _ => Self::Missing,
        }
    }

    /// Remaining lifetime, if the key expires
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            Self::Expires(secs) => Some(Duration::from_secs(*secs)),
            Self::Persistent | Self::Missing => None,
        }
    }
}
