//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Capabilities the ledger consumes from its collaborators. Events are
//! published through `shared_bus::EventPublisher`.

use shared_types::{Address, ItemId, Role};

/// Item catalog lookup.
pub trait ItemCatalogGateway: Send + Sync {
    /// Whether `item_id` names a catalog item.
    fn item_exists(&self, item_id: ItemId) -> bool;
}

/// Role registry lookup.
pub trait RoleRegistryGateway: Send + Sync {
    /// Registered for `role` and not blocked.
    fn is_active_holder(&self, identity: &Address, role: Role) -> bool;
}
