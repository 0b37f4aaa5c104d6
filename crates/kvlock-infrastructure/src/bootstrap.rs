//! Composition root
//!
//! Turns an [`AppConfig`] into a ready [`LockManager`]: picks the store
//! backend, opens it, and scopes the manager to the configured namespace.
//!
//! ```text
//! AppConfig → create_store → Arc<dyn KeyValueStore> ─┐
//!          └→ NamespaceConfig → KeyNamespace ────────┴→ LockManager
//! ```

use crate::config::{AppConfig, StoreConfig, StoreProvider};
use kvlock_application::LockManager;
use kvlock_domain::error::Result;
use kvlock_domain::ports::providers::KeyValueStore;
use kvlock_providers::{InMemoryKeyValueStore, RedisKeyValueStore};
use std::sync::Arc;
use tracing::info;

/// Registered store backend, as listed by `kvlock providers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProviderInfo {
    /// Name accepted by `store.provider`
    pub name: &'static str,
    /// Human-readable summary
    pub description: &'static str,
}

/// Every store backend this build supports
pub fn list_store_providers() -> Vec<StoreProviderInfo> {
    StoreProvider::ALL
        .iter()
        .map(|provider| StoreProviderInfo {
            name: provider.as_str(),
            description: provider.description(),
        })
        .collect()
}

/// Create the configured key-value store
///
/// Opening a Redis store does not connect; an unreachable server surfaces
/// on the first command, within the configured connect timeouts.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.provider {
        StoreProvider::Redis => Arc::new(RedisKeyValueStore::with_settings(
            &config.uri,
            config.redis_settings(),
        )?),
        StoreProvider::Memory => Arc::new(InMemoryKeyValueStore::new()),
    };
    info!(provider = store.provider_name(), "Key-value store created");
    Ok(store)
}

/// Build a lock manager from the full application configuration
pub fn build_lock_manager(config: &AppConfig) -> Result<LockManager> {
    let store = create_store(&config.store)?;
    let namespace = config.namespace.to_namespace();
    info!(
        environment = namespace.environment(),
        application = namespace.application_name(),
        "Lock manager ready"
    );
    Ok(LockManager::new(store, namespace))
}
