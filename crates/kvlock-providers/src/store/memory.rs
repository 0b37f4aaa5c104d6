//! In-memory key-value store provider
//!
//! Process-local store backed by a sharded concurrent map. Honors the same
//! atomicity contract as the Redis provider: conditional set and
//! compare-and-delete each run under the shard lock of their key.
//!
//! Expiry is lazy. An entry past its deadline is invisible to every
//! operation and is physically removed the next time its key is touched
//! (or by [`InMemoryKeyValueStore::purge_expired`]).
//!
//! ## Example
//!
//! ```ignore
//! use kvlock_providers::store::InMemoryKeyValueStore;
//!
//! let store = InMemoryKeyValueStore::new();
//! assert!(store.set_if_absent("k", "v", 30).await?);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use kvlock_domain::error::{Error, Result};
use kvlock_domain::ports::providers::KeyValueStore;
use kvlock_domain::value_objects::KeyTtl;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deadline `after` from `now`, rejecting lifetimes the clock cannot represent
fn deadline_after(now: Instant, after: Duration, command: &str) -> Result<Instant> {
    now.checked_add(after)
        .ok_or_else(|| Error::store(format!("invalid expire time in '{command}' command")))
}

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory key-value store provider
///
/// Cloning shares the underlying map, so clones observe each other's writes
/// the way separate connections to one Redis server would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<DashMap<String, StoredValue>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count()
    }

    /// Whether the store holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, stored| !stored.is_expired(now));
        before - self.entries.len()
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let value = self
            .entries
            .get(key)
            .and_then(|stored| (!stored.is_expired(now)).then(|| stored.value.clone()));
        if value.is_none() {
            self.entries.remove_if(key, |_, stored| stored.is_expired(now));
        }
        value
    }

    fn set_deadline(&self, key: &str, deadline: Instant) -> bool {
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(mut stored) if !stored.is_expired(now) => {
                stored.expires_at = Some(deadline);
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool> {
        // Same rejection Redis gives for `SET .. EX 0`
        if ttl_secs == 0 {
            return Err(Error::store("invalid expire time in 'set' command"));
        }

        let now = Instant::now();
        let fresh = StoredValue {
            value: value.to_string(),
            expires_at: Some(deadline_after(now, Duration::from_secs(ttl_secs), "set")?),
        };

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(fresh);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(fresh);
                Ok(true)
            }
        }
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool> {
        let now = Instant::now();
        let removed = self.entries.remove_if(key, |_, stored| {
            !stored.is_expired(now) && stored.value == expected
        });
        Ok(removed.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.live_value(key))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove(key)
            .is_some_and(|(_, stored)| !stored.is_expired(now)))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        let mut removed = 0;
        for key in keys {
            if self.delete(key).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool> {
        let deadline = deadline_after(Instant::now(), Duration::from_secs(ttl_secs), "expire")?;
        Ok(self.set_deadline(key, deadline))
    }

    async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool> {
        // Instants in the past collapse to "now", which expires the key at once
        let remaining = at
            .signed_duration_since(Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        let deadline = deadline_after(Instant::now(), remaining, "expireat")?;
        Ok(self.set_deadline(key, deadline))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.live_value(key).is_some())
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl> {
        let now = Instant::now();
        let ttl = match self.entries.get(key) {
            None => KeyTtl::Missing,
            Some(stored) if stored.is_expired(now) => KeyTtl::Missing,
            Some(stored) => match stored.expires_at {
                None => KeyTtl::Persistent,
                Some(at) => {
                    let millis = at.saturating_duration_since(now).as_millis();
                    let secs = u64::try_from((millis + 500) / 1000).unwrap_or(u64::MAX);
                    KeyTtl::Expires(secs)
                }
            },
        };
        Ok(ttl)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
