//! Use Cases
//!
//! | Use Case | Description |
//! |----------|-------------|
//! | [`LockManager`] | Acquire, wait for, release and inspect store-backed locks |

pub mod lock_manager;

pub use lock_manager::LockManager;
