//! # kvlock
//!
//! Distributed locks on a shared key-value store.
//!
//! Many processes, possibly on different machines, coordinate exclusive
//! access to a named resource through a single Redis server. A lock is one
//! key holding a random owner token and a server-side expiry:
//!
//! - acquire is an atomic conditional set (`SET NX EX`)
//! - release deletes the key only when it still holds the caller's token
//! - expiry guarantees a crashed holder cannot block others forever
//!
//! ## Example
//!
//! ```ignore
//! use kvlock::infrastructure::{ConfigLoader, build_lock_manager};
//!
//! let config = ConfigLoader::new().load()?;
//! let manager = build_lock_manager(&config)?;
//!
//! let key = manager.lock_key("nightly-report");
//! if let Some(token) = manager.try_lock_with_timeout(&key, 60_000, 5_000).await? {
//!     run_report().await;
//!     manager.release_lock(&key, token.as_str()).await?;
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Value objects, errors, port traits
//! - `application` - The lock manager use case
//! - `providers` - Redis and in-memory key-value stores
//! - `infrastructure` - Configuration, logging, composition root
//! - `cli` - The `kvlock` command line tool

pub mod cli;

/// Domain layer - core types and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kvlock_domain::*;
}

/// Application layer - lock manager
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use kvlock_application::*;
}

/// Store providers
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use kvlock_providers::*;
}

/// Infrastructure layer - config, logging, bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use kvlock_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use application::LockManager;
pub use domain::*;
