//! # Shared Types Crate
//!
//! This crate contains the identity, id, role and profile types used by every
//! Provenance-Chain subsystem, plus the administrator authority injected into
//! the collaborator registries.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Explicit Caller**: The host authenticates callers; subsystems receive the
//!   caller `Address` as a parameter and never read it from ambient state.
//! - **No Sentinels**: Absence is `Option`, never the zero address.

pub mod admin;
pub mod entities;
pub mod errors;

pub use admin::{AdminAuthority, AdminCheck};
pub use entities::*;
pub use errors::*;
