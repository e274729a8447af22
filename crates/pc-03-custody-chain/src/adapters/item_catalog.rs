//! Item Catalog Adapter
//!
//! Implements `ItemCatalogGateway` over the Item Catalog (pc-01).

use crate::ports::outbound::ItemCatalogGateway;
use pc_01_item_catalog::{ItemCatalogApi, ItemCatalogService};
use shared_types::{AdminCheck, ItemId};
use tracing::debug;

impl<A: AdminCheck> ItemCatalogGateway for ItemCatalogService<A> {
    fn item_exists(&self, item_id: ItemId) -> bool {
        let exists = ItemCatalogApi::item_exists(self, item_id);
        debug!(item_id, exists, "[pc-03] Catalog lookup");
        exists
    }
}
