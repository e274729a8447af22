//! Role Registry Service
//!
//! `RoleRegistry` holds the registrations for one role; `RoleDirectory`
//! owns one registry per role and applies the administrator check.

use crate::domain::{RegistryError, RolePlayer};
use crate::ports::RoleRegistryApi;
use parking_lot::RwLock;
use shared_types::{format_address, Address, AdminCheck, ParticipantProfile, Role};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registrations for a single role.
pub struct RoleRegistry {
    role: Role,
    players: RwLock<HashMap<Address, RolePlayer>>,
}

impl RoleRegistry {
    /// Create an empty registry for `role`.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Role this registry serves.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Registered and not blocked.
    pub fn is_active(&self, identity: &Address) -> bool {
        self.players
            .read()
            .get(identity)
            .is_some_and(RolePlayer::is_active)
    }

    /// Add a registration. Only the first registration per identity counts.
    pub fn register(
        &self,
        identity: Address,
        profile: ParticipantProfile,
    ) -> Result<(), RegistryError> {
        let mut players = self.players.write();
        if players.contains_key(&identity) {
            return Err(RegistryError::AlreadyRegistered(self.role));
        }
        players.insert(identity, RolePlayer::new(self.role, profile));
        Ok(())
    }

    /// Fetch a registration.
    pub fn get(&self, identity: &Address) -> Result<RolePlayer, RegistryError> {
        self.players
            .read()
            .get(identity)
            .cloned()
            .ok_or(RegistryError::NotRegistered(self.role))
    }

    /// Set or clear the blocked flag.
    pub fn set_blocked(&self, identity: &Address, blocked: bool) -> Result<(), RegistryError> {
        let mut players = self.players.write();
        let player = players
            .get_mut(identity)
            .ok_or(RegistryError::NotRegistered(self.role))?;
        player.blocked = blocked;
        Ok(())
    }

    /// Number of registrations, blocked included.
    pub fn len(&self) -> usize {
        self.players.read().len()
    }

    /// Whether no identity is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One registry per supply-chain role, administered by a single authority.
pub struct RoleDirectory<A: AdminCheck> {
    admin: Arc<A>,
    registries: HashMap<Role, RoleRegistry>,
}

impl<A: AdminCheck> RoleDirectory<A> {
    /// Create empty registries for every role.
    pub fn new(admin: Arc<A>) -> Self {
        let registries = Role::ALL
            .iter()
            .map(|role| (*role, RoleRegistry::new(*role)))
            .collect();
        Self { admin, registries }
    }

    /// Registry for a single role.
    pub fn registry(&self, role: Role) -> &RoleRegistry {
        // Every role is inserted in `new`.
        &self.registries[&role]
    }

    fn ensure_admin(&self, caller: &Address, role: Role) -> Result<(), RegistryError> {
        if !self.admin.is_admin(caller) {
            warn!(
                caller = %format_address(caller),
                role = %role,
                "[pc-02] Rejected registry mutation from non-admin"
            );
            return Err(RegistryError::Unauthorized(role));
        }
        Ok(())
    }
}

impl<A: AdminCheck> RoleRegistryApi for RoleDirectory<A> {
    fn register_player(
        &self,
        caller: &Address,
        role: Role,
        identity: Address,
        profile: ParticipantProfile,
    ) -> Result<(), RegistryError> {
        self.ensure_admin(caller, role)?;
        self.registry(role).register(identity, profile)?;
        info!(
            identity = %format_address(&identity),
            role = %role,
            "[pc-02] Role holder registered"
        );
        Ok(())
    }

    fn get_player(&self, role: Role, identity: &Address) -> Result<RolePlayer, RegistryError> {
        debug!(identity = %format_address(identity), role = %role, "[pc-02] Fetching role holder");
        self.registry(role).get(identity)
    }

    fn block(
        &self,
        caller: &Address,
        role: Role,
        identity: &Address,
    ) -> Result<(), RegistryError> {
        self.ensure_admin(caller, role)?;
        self.registry(role).set_blocked(identity, true)?;
        info!(identity = %format_address(identity), role = %role, "[pc-02] Role holder blocked");
        Ok(())
    }

    fn unblock(
        &self,
        caller: &Address,
        role: Role,
        identity: &Address,
    ) -> Result<(), RegistryError> {
        self.ensure_admin(caller, role)?;
        self.registry(role).set_blocked(identity, false)?;
        info!(identity = %format_address(identity), role = %role, "[pc-02] Role holder unblocked");
        Ok(())
    }

    fn is_active_holder(&self, identity: &Address, role: Role) -> bool {
        self.registry(role).is_active(identity)
    }
}
