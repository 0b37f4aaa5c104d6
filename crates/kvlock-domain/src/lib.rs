//! # kvlock Domain Layer
//!
//! Core types and boundary contracts for mutual exclusion arbitrated by a
//! shared key-value store.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Lock protocol constants (poll interval, wait bound, release script) |
//! | [`value_objects`] | Tokens, outcomes, key kinds and the key namespacer |
//! | [`ports`] | Store and lock provider traits implemented by outer layers |
//!
//! The domain holds no I/O. Every lock record lives in the external store;
//! this crate only describes how to talk about it.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::{KeyKind, KeyNamespace, KeyTtl, LockGuard, LockOutcome, LockToken};
