//! Application Layer - kvlock
//!
//! Implements the distributed-lock use case over the ports declared in
//! `kvlock-domain`.
//!
//! ## Architecture
//!
//! The application layer:
//! - Contains use case implementations (application services)
//! - Orchestrates domain value objects and ports
//! - Has no dependencies on infrastructure or concrete store backends
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `kvlock-domain`: For value objects, ports and errors
//! - Pure Rust libraries for async and logging

pub mod use_cases;

pub use use_cases::*;
