//! Domain Value Objects
//!
//! Immutable value objects that represent lock concepts without identity.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`LockToken`] | Unique proof of ownership minted per acquisition |
//! | [`LockOutcome`] | Acquired / contended / unavailable result of one attempt |
//! | [`LockGuard`] | Key and token pair held by a lock owner |
//! | [`KeyKind`] | Value kind segment of a namespaced key |
//! | [`KeyNamespace`] | Builder for `env:app:kind:key` store keys |
//! | [`KeyTtl`] | Remaining lifetime of a store key |

/// Namespaced store keys
pub mod key;
/// Lock tokens, outcomes and guards
pub mod lock;
/// Key time-to-live
pub mod ttl;

pub use key::{KeyKind, KeyNamespace};
pub use lock::{LockGuard, LockOutcome, LockToken};
pub use ttl::KeyTtl;
