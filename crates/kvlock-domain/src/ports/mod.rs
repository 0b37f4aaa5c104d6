//! Domain Port Interfaces
//!
//! Defines the boundary contracts between the domain and outer layers.
//! High-level modules (domain, application) define interfaces; low-level
//! modules (providers, infrastructure) implement them.
//!
//! ## Organization
//!
//! - **infrastructure/** - Services offered to callers (distributed locks)
//! - **providers/** - External backends consumed by the core (key-value stores)

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use infrastructure::LockProvider;
pub use providers::KeyValueStore;
