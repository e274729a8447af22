//! # Ports Module
//!
//! Inbound API of the Role Registry.

pub mod inbound;

pub use inbound::*;
