//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports over the in-process collaborator services.

mod item_catalog;
mod role_registry;
