//! # Inbound Ports
//!
//! API trait defining what the Item Catalog can do.

use crate::domain::{CatalogError, Item, NewItem};
use shared_types::{Address, ItemId};

/// Item catalog API - inbound port.
pub trait ItemCatalogApi: Send + Sync {
    /// Create a catalog item. Administrator only.
    fn create_item(&self, caller: &Address, item: NewItem) -> Result<ItemId, CatalogError>;

    /// Fetch an item by id.
    fn get_item(&self, item_id: ItemId) -> Result<Item, CatalogError>;

    /// Whether an item with this id exists.
    fn item_exists(&self, item_id: ItemId) -> bool;

    /// Mark an item as in or out of production. Administrator only.
    fn set_in_production(
        &self,
        caller: &Address,
        item_id: ItemId,
        in_production: bool,
    ) -> Result<(), CatalogError>;

    /// Number of items in the catalog.
    fn item_count(&self) -> u64;
}
