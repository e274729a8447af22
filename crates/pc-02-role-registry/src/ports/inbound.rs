//! # Inbound Ports

use crate::domain::{RegistryError, RolePlayer};
use shared_types::{Address, ParticipantProfile, Role};

/// Role registry API - inbound port.
pub trait RoleRegistryApi: Send + Sync {
    /// Register `identity` as a holder of `role`. Administrator only.
    fn register_player(
        &self,
        caller: &Address,
        role: Role,
        identity: Address,
        profile: ParticipantProfile,
    ) -> Result<(), RegistryError>;

    /// Fetch a registration.
    fn get_player(&self, role: Role, identity: &Address) -> Result<RolePlayer, RegistryError>;

    /// Block a holder. Administrator only.
    fn block(&self, caller: &Address, role: Role, identity: &Address)
        -> Result<(), RegistryError>;

    /// Unblock a holder. Administrator only.
    fn unblock(
        &self,
        caller: &Address,
        role: Role,
        identity: &Address,
    ) -> Result<(), RegistryError>;

    /// Registered and not blocked for `role`.
    fn is_active_holder(&self, identity: &Address, role: Role) -> bool;
}
