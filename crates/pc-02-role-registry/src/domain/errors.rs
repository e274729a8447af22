//! # Domain Errors

use shared_types::Role;
use thiserror::Error;

/// Role registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the administrator.
    #[error("Unauthorized: only the administrator may manage {0} registrations")]
    Unauthorized(Role),

    /// Identity already holds a registration for this role.
    #[error("Identity already registered as {0}")]
    AlreadyRegistered(Role),

    /// Identity has no registration for this role.
    #[error("Identity not registered as {0}")]
    NotRegistered(Role),
}
