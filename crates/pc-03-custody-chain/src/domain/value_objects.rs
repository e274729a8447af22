//! # Domain Value Objects
//!
//! Immutable value types for the custody ledger.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, ContactProfile, Timestamp};

/// Custody chain status state machine.
///
/// ```text
/// InCustodyChain --close_to_consumer--> Delivered --transfer--> Reowned --transfer--> Reowned
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChainStatus {
    /// Moving between role holders; only custodians may act.
    #[default]
    InCustodyChain,
    /// Closed to its first consumer.
    Delivered,
    /// Transferred at least once between consumers.
    Reowned,
}

impl ChainStatus {
    /// Check if transition to next state is valid.
    pub fn can_transition_to(&self, next: ChainStatus) -> bool {
        matches!(
            (self, next),
            (Self::InCustodyChain, Self::Delivered)
                | (Self::Delivered, Self::Reowned)
                | (Self::Reowned, Self::Reowned)
        )
    }

    /// Whether role holders may still append custody entries.
    pub fn accepts_custody(&self) -> bool {
        matches!(self, Self::InCustodyChain)
    }

    /// Whether a consumer currently owns the item.
    pub fn is_consumer_owned(&self) -> bool {
        matches!(self, Self::Delivered | Self::Reowned)
    }

    /// Lowercase name for logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InCustodyChain => "in_custody_chain",
            Self::Delivered => "delivered",
            Self::Reowned => "reowned",
        }
    }
}

/// Which kind of custody step a caller is attempting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// First entry, written by the manufacturer.
    Open,
    /// Intermediate hand-off.
    Extend,
    /// Final hand-off to a consumer.
    Close,
}

/// One consumer-to-consumer resale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransfer {
    /// Previous owner.
    pub from: Address,
    /// New owner.
    pub to: Address,
    /// Time of transfer.
    pub at: Timestamp,
}

/// Read-only view of a consumer returned by queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerView {
    /// Consumer identity.
    pub identity: Address,
    /// Display data.
    pub profile: ContactProfile,
    /// Chains currently owned, in the order they were acquired.
    pub held_items: Vec<ChainId>,
}
