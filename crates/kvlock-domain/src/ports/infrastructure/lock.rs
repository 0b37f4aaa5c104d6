//! Distributed Lock Provider Port
//!
//! Defines the contract for distributed lock coordination services.

use crate::error::Result;
use crate::value_objects::LockGuard;
use async_trait::async_trait;
use std::time::Duration;

/// Distributed lock provider interface
///
/// Works on logical keys; implementations namespace them before they reach
/// the store. There is no renewal: once `ttl` elapses the lock is gone even
/// if the holder is still running.
#[async_trait]
pub trait LockProvider: Send + Sync {
    /// Acquire a distributed lock, waiting at most `timeout`
    ///
    /// Returns `Ok(None)` when the lock could not be obtained in time.
    async fn acquire(
        &self,
        key: &str,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<Option<LockGuard>>;

    /// Release a distributed lock
    ///
    /// Returns `Ok(false)` when the lock had already expired or changed hands.
    async fn release(&self, guard: &LockGuard) -> Result<bool>;
}
