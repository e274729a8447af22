//! # Ports Module
//!
//! Inbound API of the Item Catalog.

pub mod inbound;

pub use inbound::*;
