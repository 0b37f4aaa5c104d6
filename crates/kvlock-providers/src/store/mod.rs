//! Key-Value Store Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryKeyValueStore`] | Local | Sharded in-process map with lazy expiry |
//! | [`RedisKeyValueStore`] | Distributed | Redis-backed, shared by many processes |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `InMemoryKeyValueStore`
//! - **Multi Process / Multi Host**: Use `RedisKeyValueStore`

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "store-memory")]
pub use memory::InMemoryKeyValueStore;
#[cfg(feature = "store-redis")]
pub use redis::{RedisConnectionSettings, RedisKeyValueStore};
