//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Role`
//! - **Identifiers**: `ItemId`, `ChainId`, `Timestamp`
//! - **Profiles**: `ParticipantProfile`, `ContactProfile`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::RoleParseError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte account address identifying a participant.
pub type Address = [u8; 20];

/// Catalog item identifier (dense, starting at 1).
pub type ItemId = u64;

/// Custody chain identifier (dense, starting at 1).
pub type ChainId = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Render an address as `0x`-prefixed lowercase hex.
pub fn format_address(address: &Address) -> String {
    let mut out = String::with_capacity(2 + address.len() * 2);
    out.push_str("0x");
    for byte in address {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

/// Supply-chain roles that can hold custody of an item before it reaches a
/// consumer.
///
/// The set is closed; which role acts at which chain position is decided by
/// configuration in the custody subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Creates the item and opens its custody chain.
    Manufacturer,
    /// First intermediate hand-off.
    Distributor,
    /// Second intermediate hand-off.
    Wholesaler,
    /// Sells the item to a consumer and closes the chain.
    Retailer,
}

impl Role {
    /// Every role, in default supply-chain order.
    pub const ALL: [Role; 4] = [
        Role::Manufacturer,
        Role::Distributor,
        Role::Wholesaler,
        Role::Retailer,
    ];

    /// Lowercase name used in logs, metrics labels and profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturer => "manufacturer",
            Self::Distributor => "distributor",
            Self::Wholesaler => "wholesaler",
            Self::Retailer => "retailer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manufacturer" => Ok(Self::Manufacturer),
            "distributor" => Ok(Self::Distributor),
            "wholesaler" => Ok(Self::Wholesaler),
            "retailer" => Ok(Self::Retailer),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

// =============================================================================
// CLUSTER B: PROFILES
// =============================================================================

/// Profile of a registered role holder (manufacturer, distributor, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    /// Trading name of the business.
    pub name: String,
    /// Legal owner of the business.
    pub owner: String,
    /// Postal contact address.
    pub contact_address: String,
    /// Contact phone number.
    pub phone: u64,
    /// References to externally stored evidence (licences, certificates).
    pub evidence_refs: Vec<String>,
}

/// Display data a consumer registers with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProfile {
    /// Display name.
    pub name: String,
    /// Postal contact address.
    pub contact_address: String,
    /// Contact phone number.
    pub phone: u64,
}

impl ContactProfile {
    /// Profile with only a display name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
