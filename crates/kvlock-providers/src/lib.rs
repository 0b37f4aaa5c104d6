//! # kvlock - Provider Implementations
//!
//! This crate contains the user-selectable key-value store backends. Each
//! provider implements the `KeyValueStore` port defined in `kvlock-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Key-Value Store | `KeyValueStore` | Redis, InMemory |
//!
//! ## Feature Flags
//!
//! Each provider can be enabled/disabled via feature flags for minimal builds:
//!
//! ```toml
//! [dependencies]
//! kvlock-providers = { version = "0.1", default-features = false, features = ["store-redis"] }
//! ```

// Re-export kvlock-domain types commonly used with providers
pub use kvlock_domain::error::{Error, Result};
pub use kvlock_domain::ports::providers::KeyValueStore;

/// Key-value store provider implementations
///
/// Implements `KeyValueStore` trait for store backends.
pub mod store;

#[cfg(feature = "store-memory")]
pub use store::InMemoryKeyValueStore;
#[cfg(feature = "store-redis")]
pub use store::{RedisConnectionSettings, RedisKeyValueStore};
