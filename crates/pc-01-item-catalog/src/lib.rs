//! # PC-01 Item Catalog
//!
//! Admin-managed catalog of manufactured items.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Holds the descriptive record of every product line (brand, name, model,
//! description, evidence references) and whether it is still in production.
//! The custody subsystem only asks whether an item id exists; many custody
//! chains may instantiate the same catalog item.
//!
//! ## Module Structure
//!
//! ```text
//! pc-01-item-catalog/
//! ├── domain/          # Item, NewItem, CatalogError
//! ├── ports/           # ItemCatalogApi
//! └── service.rs       # ItemCatalogService (in-memory, lock-protected)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{CatalogError, Item, NewItem};
pub use ports::ItemCatalogApi;
pub use service::ItemCatalogService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
