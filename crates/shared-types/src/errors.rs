//! # Error Types
//!
//! Errors shared across subsystems.

use thiserror::Error;

/// A role name that does not match any supply-chain role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(pub String);
