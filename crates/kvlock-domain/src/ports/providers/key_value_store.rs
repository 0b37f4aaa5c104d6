//! Key-Value Store Port
//!
//! Port for the networked store that arbitrates lock ownership. Supports a
//! distributed backend (Redis) and an in-process backend that honors the same
//! atomicity contract.
//!
//! ## Atomicity Contract
//!
//! Two operations must be indivisible on the store side:
//!
//! - [`KeyValueStore::set_if_absent`] writes only when the key has no live value
//! - [`KeyValueStore::compare_and_delete`] compares and deletes in one step
//!
//! Everything the lock protocol guarantees rests on these two.

use crate::error::Result;
use crate::value_objects::KeyTtl;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Key-Value Store Port
///
/// Defines the primitive operations the lock core consumes. Implementations
/// report transport failures as [`crate::Error::Store`]; a missing key is a
/// normal `None` / `false`, never an error.
///
/// # Implementations
///
/// - **Redis**: networked store, `SET NX EX` plus a scripted release
/// - **Memory**: process-local store for tests and single-process use
///
/// # Example
///
/// ```ignore
/// use kvlock_domain::ports::providers::KeyValueStore;
///
/// if store.set_if_absent("prod:app:string:job", &token, 30).await? {
///     // critical section
///     store.compare_and_delete("prod:app:string:job", &token).await?;
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Set `key = value` with an expiry only if the key does not exist
    ///
    /// # Arguments
    /// * `key` - The store key
    /// * `value` - The value to write
    /// * `ttl_secs` - Expiry in whole seconds, must be positive
    ///
    /// # Returns
    /// True if the value was written, false if the key already held a value
    async fn set_if_absent(&self, key: &str, value: &str, ttl_secs: u64) -> Result<bool>;

    /// Delete `key` only if its current value equals `expected`
    ///
    /// # Returns
    /// True if the value matched and the key was removed
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool>;

    /// Get the current value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditionally delete `key`
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Unconditionally delete several keys
    ///
    /// # Returns
    /// The number of keys that existed and were removed
    async fn delete_many(&self, keys: &[String]) -> Result<u64>;

    /// Reset the expiry of `key` to `ttl_secs` from now
    ///
    /// # Returns
    /// True if the key exists and the expiry was set
    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<bool>;

    /// Set the expiry of `key` to an absolute instant
    ///
    /// # Returns
    /// True if the key exists and the expiry was set
    async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool>;

    /// Check whether `key` currently holds a value
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Remaining lifetime of `key`
    async fn ttl(&self, key: &str) -> Result<KeyTtl>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "redis", "memory")
    fn provider_name(&self) -> &str;
}
