//! # Ports Module
//!
//! Inbound APIs of the custody ledger and the collaborator capabilities it
//! consumes.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
