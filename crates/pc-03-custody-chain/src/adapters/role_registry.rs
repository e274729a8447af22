//! Role Registry Adapter
//!
//! Implements `RoleRegistryGateway` over the Role Registry (pc-02). Every
//! lookup reads the live registration, so blocking a holder takes effect on
//! their next call.

use crate::ports::outbound::RoleRegistryGateway;
use pc_02_role_registry::{RoleDirectory, RoleRegistryApi};
use shared_types::{format_address, Address, AdminCheck, Role};
use tracing::debug;

impl<A: AdminCheck> RoleRegistryGateway for RoleDirectory<A> {
    fn is_active_holder(&self, identity: &Address, role: Role) -> bool {
        let active = RoleRegistryApi::is_active_holder(self, identity, role);
        debug!(
            identity = %format_address(identity),
            role = %role,
            active,
            "[pc-03] Role lookup"
        );
        active
    }
}
