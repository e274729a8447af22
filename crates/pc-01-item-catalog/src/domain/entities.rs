//! # Domain Entities
//!
//! Catalog item records.

use super::errors::CatalogError;
use serde::{Deserialize, Serialize};

/// Descriptive fields supplied when creating a catalog item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewItem {
    /// Brand the item is sold under.
    pub brand: String,
    /// Product name.
    pub name: String,
    /// Model or category.
    pub model: String,
    /// Free-form description.
    pub description: String,
    /// References to externally stored evidence (photos, certificates).
    pub evidence_refs: Vec<String>,
}

impl NewItem {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.brand.trim().is_empty() {
            return Err(CatalogError::MissingField("brand"));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::MissingField("name"));
        }
        Ok(())
    }
}

/// A stored catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Whether the item is still being manufactured.
    pub in_production: bool,
    /// Brand the item is sold under.
    pub brand: String,
    /// Product name.
    pub name: String,
    /// Model or category.
    pub model: String,
    /// Free-form description.
    pub description: String,
    /// References to externally stored evidence.
    pub evidence_refs: Vec<String>,
}

impl From<NewItem> for Item {
    fn from(new: NewItem) -> Self {
        Self {
            in_production: true,
            brand: new.brand,
            name: new.name,
            model: new.model,
            description: new.description,
            evidence_refs: new.evidence_refs,
        }
    }
}
