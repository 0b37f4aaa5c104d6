//! Lock Manager Use Case
//!
//! Token-based mutual exclusion on top of a [`KeyValueStore`]. All lock state
//! lives in the store; the manager only mints tokens and issues commands.
//!
//! ## Protocol
//!
//! | Step | Store command |
//! |------|---------------|
//! | acquire | `SET key token NX EX ttl_secs` |
//! | release | check-and-delete script on `key` with `token` |
//! | inspect | `GET key` |
//!
//! There is no renewal. A holder whose critical section outlives the TTL
//! loses the lock silently, so choose TTLs generously.

use kvlock_domain::constants::{LOCK_MAX_WAIT_MS, LOCK_MIN_TTL_MS, LOCK_RETRY_INTERVAL_MS};
use kvlock_domain::error::{Error, Result};
use kvlock_domain::ports::infrastructure::LockProvider;
use kvlock_domain::ports::providers::KeyValueStore;
use kvlock_domain::value_objects::{KeyKind, KeyNamespace, LockGuard, LockOutcome, LockToken};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, warn};

/// Convert a millisecond TTL to whole store seconds, rejecting zero
fn ttl_to_secs(ttl_millis: u64) -> Result<u64> {
    match ttl_millis / 1000 {
        0 => Err(Error::invalid_argument(format!(
            "ttl of {ttl_millis}ms rounds down to zero seconds; use at least {LOCK_MIN_TTL_MS}ms"
        ))),
        secs => Ok(secs),
    }
}

fn validate_key(lock_key: &str) -> Result<()> {
    if lock_key.is_empty() {
        return Err(Error::invalid_argument("lock key must not be empty"));
    }
    Ok(())
}

fn validate_timeout(timeout_millis: u64) -> Result<()> {
    if timeout_millis == 0 || timeout_millis > LOCK_MAX_WAIT_MS {
        return Err(Error::invalid_argument(format!(
            "timeout must be greater than 0 and at most {LOCK_MAX_WAIT_MS}ms, got {timeout_millis}ms"
        )));
    }
    Ok(())
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Distributed lock manager
///
/// Cheap to clone; clones share the store handle.
///
/// # Example
///
/// ```ignore
/// let manager = LockManager::new(store, KeyNamespace::new("prod", "billing"));
///
/// let key = manager.lock_key("invoice-run");
/// if let Some(token) = manager.try_lock_with_timeout(&key, 30_000, 5_000).await? {
///     // critical section
///     manager.release_lock(&key, token.as_str()).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LockManager {
    store: Arc<dyn KeyValueStore>,
    namespace: KeyNamespace,
}

impl LockManager {
    /// Create a lock manager over a store, scoped to a key namespace
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: KeyNamespace) -> Self {
        Self { store, namespace }
    }

    /// Namespace used by [`LockManager::lock_key`]
    pub fn namespace(&self) -> &KeyNamespace {
        &self.namespace
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Fully-qualified lock key for a logical resource name
    pub fn lock_key(&self, logical_key: &str) -> String {
        self.namespace.build_key(KeyKind::String, logical_key)
    }

    /// Make a single acquisition attempt, reporting why it failed
    ///
    /// `Err` is only returned for rejected arguments, before the store is
    /// contacted. Store failures are logged and reported as
    /// [`LockOutcome::Unavailable`].
    pub async fn attempt_lock(&self, lock_key: &str, ttl_millis: u64) -> Result<LockOutcome> {
        validate_key(lock_key)?;
        let ttl_secs = ttl_to_secs(ttl_millis)?;

        let token = LockToken::generate();
        match self
            .store
            .set_if_absent(lock_key, token.as_str(), ttl_secs)
            .await
        {
            Ok(true) => {
                debug!(key = lock_key, ttl_secs, "lock acquired");
                Ok(LockOutcome::Acquired(token))
            }
            Ok(false) => {
                debug!(key = lock_key, "lock held by another owner");
                Ok(LockOutcome::Contended)
            }
            Err(e) => {
                error!(key = lock_key, error = %e, "lock acquisition failed");
                Ok(LockOutcome::Unavailable {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Try to acquire the lock exactly once
    ///
    /// Returns the new token, or `None` when the key is held or the store
    /// could not be reached. Latency is bounded by the store's own connect
    /// and response timeouts.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key or a TTL under one second. Store
    /// failures are never errors here.
    pub async fn try_lock_once(&self, lock_key: &str, ttl_millis: u64) -> Result<Option<LockToken>> {
        Ok(self.attempt_lock(lock_key, ttl_millis).await?.into_token())
    }

    /// Poll for the lock every 50ms until acquired or `timeout_millis` elapses
    ///
    /// `timeout_millis` must be in `(0, 60000]`. The loop stops retrying once
    /// more than `timeout_millis - 50` has elapsed. Each attempt is also cut
    /// off at the remaining deadline, so a slow or unreachable store cannot
    /// stretch the call past `timeout_millis`. Waiting is a timer await and
    /// does not pin a thread.
    ///
    /// An attempt abandoned at the deadline may still have been applied by
    /// the store; such a record is unowned and lapses with its TTL.
    pub async fn try_lock_with_timeout(
        &self,
        lock_key: &str,
        ttl_millis: u64,
        timeout_millis: u64,
    ) -> Result<Option<LockToken>> {
        validate_timeout(timeout_millis)?;
        validate_key(lock_key)?;
        ttl_to_secs(ttl_millis)?;

        let retry_interval = Duration::from_millis(LOCK_RETRY_INTERVAL_MS);
        let deadline = Duration::from_millis(timeout_millis);
        let give_up_after =
            Duration::from_millis(timeout_millis.saturating_sub(LOCK_RETRY_INTERVAL_MS));
        let started = Instant::now();

        loop {
            let remaining = deadline.saturating_sub(started.elapsed());
            match tokio::time::timeout(remaining, self.attempt_lock(lock_key, ttl_millis)).await {
                Ok(outcome) => {
                    if let Some(token) = outcome?.into_token() {
                        debug!(
                            key = lock_key,
                            waited_ms = duration_to_millis(started.elapsed()),
                            "lock acquired after waiting"
                        );
                        return Ok(Some(token));
                    }
                }
                Err(_) => {
                    warn!(
                        key = lock_key,
                        timeout_ms = timeout_millis,
                        "lock attempt still pending at deadline"
                    );
                    break;
                }
            }
            if started.elapsed() > give_up_after {
                break;
            }
            tokio::time::sleep(retry_interval).await;
        }

        debug!(key = lock_key, timeout_ms = timeout_millis, "timed out waiting for lock");
        Ok(None)
    }

    /// Release the lock if `token` still owns it
    ///
    /// Returns `Ok(false)` when there was nothing to release: the lock
    /// expired, was already released, or belongs to another owner. Callers
    /// should not retry on `false`.
    pub async fn release_lock(&self, lock_key: &str, token: &str) -> Result<bool> {
        validate_key(lock_key)?;
        if token.is_empty() {
            return Err(Error::invalid_argument("token must not be empty"));
        }

        let released = self.store.compare_and_delete(lock_key, token).await?;
        if released {
            debug!(key = lock_key, "lock released");
        } else {
            warn!(key = lock_key, "lock release: key missing or owned by another token");
        }
        Ok(released)
    }

    /// Raw read of the value under `lock_key`, typically the holder's token
    ///
    /// Store failures are logged and reported as `None`.
    pub async fn get(&self, lock_key: &str) -> Option<String> {
        match self.store.get(lock_key).await {
            Ok(value) => value,
            Err(e) => {
                error!(key = lock_key, error = %e, "lock read failed");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl LockProvider for LockManager {
    async fn acquire(
        &self,
        key: &str,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<Option<LockGuard>> {
        let lock_key = self.lock_key(key);
        let token = self
            .try_lock_with_timeout(
                &lock_key,
                duration_to_millis(ttl),
                duration_to_millis(timeout),
            )
            .await?;
        Ok(token.map(|token| LockGuard::new(lock_key, token)))
    }

    async fn release(&self, guard: &LockGuard) -> Result<bool> {
        self.release_lock(&guard.key, guard.token.as_str()).await
    }
}
