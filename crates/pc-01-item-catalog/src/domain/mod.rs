//! # Domain Module
//!
//! Core domain types for the Item Catalog.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
