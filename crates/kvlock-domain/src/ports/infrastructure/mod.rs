//! Infrastructure Service Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`LockProvider`] | Distributed lock coordination |

/// Distributed lock port
pub mod lock;

pub use lock::LockProvider;
