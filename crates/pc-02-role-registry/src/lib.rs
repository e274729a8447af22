//! # PC-02 Role Registry
//!
//! Registered holders of the supply-chain roles, one registry per role.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! The administrator registers manufacturers, distributors, wholesalers and
//! retailers and may block or unblock them at any time. The custody
//! subsystem asks a single question per step: is this identity a
//! registered, unblocked holder of role R?
//!
//! ## Module Structure
//!
//! ```text
//! pc-02-role-registry/
//! ├── domain/          # RolePlayer, RegistryError
//! ├── ports/           # RoleRegistryApi
//! └── service.rs       # RoleRegistry (per role), RoleDirectory (all roles)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{RegistryError, RolePlayer};
pub use ports::RoleRegistryApi;
pub use service::{RoleDirectory, RoleRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
