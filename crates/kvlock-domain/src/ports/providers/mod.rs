//! External Provider Ports
//!
//! Ports for external services the domain depends on.
//!
//! | Port | Description |
//! |------|-------------|
//! | KeyValueStore | Networked store with conditional set and scripted release |

/// Key-value store port
pub mod key_value_store;

pub use key_value_store::KeyValueStore;
