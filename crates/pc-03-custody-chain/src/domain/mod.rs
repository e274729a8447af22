//! # Domain Module
//!
//! Chain records, consumers, status machine, errors and ledger invariants.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
