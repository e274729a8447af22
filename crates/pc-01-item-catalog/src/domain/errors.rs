//! # Domain Errors
//!
//! Error types for the Item Catalog.

use shared_types::ItemId;
use thiserror::Error;

/// Item catalog error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Caller is not the administrator.
    #[error("Unauthorized: only the administrator may modify the catalog")]
    Unauthorized,

    /// No item with this id.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// A required descriptive field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
