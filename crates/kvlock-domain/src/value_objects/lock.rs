//! Lock value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Proof of ownership for one acquisition
///
/// Minted fresh for every attempt from a v4 UUID, rendered as 32 lowercase
/// hex digits without separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockToken(String);

impl LockToken {
    /// Mint a new random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Token as stored in the lock record
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the stored value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for LockToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LockToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for LockToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LockToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LockToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Result of a single acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// The conditional set succeeded; the caller now holds the lock
    Acquired(LockToken),
    /// Another holder owns the key
    Contended,
    /// The store could not be reached or rejected the command
    Unavailable {
        /// Human-readable failure description
        reason: String,
    },
}

impl LockOutcome {
    /// Whether the attempt obtained the lock
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired(_))
    }

    /// Token if acquired, discarding the reason for failure
    pub fn into_token(self) -> Option<LockToken> {
        match self {
            Self::Acquired(token) => Some(token),
            Self::Contended | Self::Unavailable { .. } => None,
        }
    }

    /// Label for logs and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Acquired(_) => "acquired",
            Self::Contended => "contended",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

/// Key and token pair held by a lock owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockGuard {
    /// Fully-qualified lock key
    pub key: String,
    /// Unique token for this lock acquisition
    pub token: LockToken,
}

impl LockGuard {
    /// Pair a key with the token that acquired it
    pub fn new<K: Into<String>>(key: K, token: LockToken) -> Self {
        Self {
            key: key.into(),
            token,
        }
    }
}
