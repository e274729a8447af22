//! Item Catalog Service
//!
//! In-memory catalog guarded by a single `RwLock`. Ids are allocated under
//! the write lock, so they stay dense.

use crate::domain::{CatalogError, Item, NewItem};
use crate::ports::ItemCatalogApi;
use parking_lot::RwLock;
use shared_types::{format_address, Address, AdminCheck, ItemId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Item Catalog Service
pub struct ItemCatalogService<A: AdminCheck> {
    admin: Arc<A>,
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl<A: AdminCheck> ItemCatalogService<A> {
    /// Create an empty catalog administered by `admin`.
    pub fn new(admin: Arc<A>) -> Self {
        Self {
            admin,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    fn ensure_admin(&self, caller: &Address) -> Result<(), CatalogError> {
        if !self.admin.is_admin(caller) {
            warn!(
                caller = %format_address(caller),
                "[pc-01] Rejected catalog mutation from non-admin"
            );
            return Err(CatalogError::Unauthorized);
        }
        Ok(())
    }
}

impl<A: AdminCheck> ItemCatalogApi for ItemCatalogService<A> {
    fn create_item(&self, caller: &Address, item: NewItem) -> Result<ItemId, CatalogError> {
        self.ensure_admin(caller)?;
        item.validate()?;

        let mut items = self.items.write();
        let item_id = items.len() as ItemId + 1;
        info!(
            item_id,
            brand = %item.brand,
            name = %item.name,
            "[pc-01] Catalog item created"
        );
        items.insert(item_id, Item::from(item));
        Ok(item_id)
    }

    fn get_item(&self, item_id: ItemId) -> Result<Item, CatalogError> {
        debug!(item_id, "[pc-01] Fetching catalog item");
        self.items
            .read()
            .get(&item_id)
            .cloned()
            .ok_or(CatalogError::ItemNotFound(item_id))
    }

    fn item_exists(&self, item_id: ItemId) -> bool {
        self.items.read().contains_key(&item_id)
    }

    fn set_in_production(
        &self,
        caller: &Address,
        item_id: ItemId,
        in_production: bool,
    ) -> Result<(), CatalogError> {
        self.ensure_admin(caller)?;

        let mut items = self.items.write();
        let item = items
            .get_mut(&item_id)
            .ok_or(CatalogError::ItemNotFound(item_id))?;
        item.in_production = in_production;
        info!(item_id, in_production, "[pc-01] Production flag updated");
        Ok(())
    }

    fn item_count(&self) -> u64 {
        self.items.read().len() as u64
    }
}
