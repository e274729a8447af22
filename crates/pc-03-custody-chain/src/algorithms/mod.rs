//! Algorithms for the custody ledger
//!
//! Contains:
//! - Transfer authorization predicate

pub mod authorization;

pub use authorization::{
    authorize, authorize_creation, authorize_owner, authorize_step, check_continuity,
    check_role, resolve_step, AuthorizationDecision,
};
