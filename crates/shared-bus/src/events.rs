//! # Custody Events
//!
//! Defines all event types that flow through the shared bus. Every event is
//! published after the ledger mutation it describes has been committed.
//!
//! ## Ordering
//!
//! Publication happens after the ledger releases its locks, so two
//! mutations of one chain may reach the bus in either order. Every
//! chain-scoped event carries the chain's `version` as of that commit:
//! versions of one chain start at 1 and rise by one per committed mutation.
//! Subscribers folding events into their own state must ignore an event
//! whose version is not above the last one applied for that chain.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, ItemId, Role, Timestamp};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyEvent {
    // =========================================================================
    // CUSTODY CHAIN LEDGER
    // =========================================================================
    /// A manufacturer opened a new custody chain.
    ChainCreated {
        /// Newly allocated chain id.
        chain_id: ChainId,
        /// Chain version after this commit.
        version: u64,
        /// Catalog item the chain instantiates.
        item_id: ItemId,
        /// Manufacturer holding the first entry.
        manufacturer: Address,
        /// Declared next custodian.
        intended_recipient: Option<Address>,
        /// Receipt time of the first entry.
        received_at: Timestamp,
    },

    /// An intermediate custodian appended an entry.
    CustodyExtended {
        /// Chain being extended.
        chain_id: ChainId,
        /// Chain version after this commit.
        version: u64,
        /// Position of the appended entry.
        position: usize,
        /// Identity that took custody.
        custodian: Address,
        /// Role the custodian acted under.
        role: Role,
        /// Declared next custodian.
        intended_recipient: Option<Address>,
        /// Receipt time of the appended entry.
        received_at: Timestamp,
    },

    // =========================================================================
    // DELIVERY
    // =========================================================================
    /// The retailer closed the chain to its first consumer.
    ChainDelivered {
        /// Delivered chain.
        chain_id: ChainId,
        /// Chain version after this commit.
        version: u64,
        /// Retailer that handed the item over.
        retailer: Address,
        /// First consumer owner.
        consumer: Address,
        /// Delivery time.
        delivered_at: Timestamp,
    },

    // =========================================================================
    // OWNERSHIP
    // =========================================================================
    /// A consumer transferred the item to another consumer.
    OwnershipTransferred {
        /// Transferred chain.
        chain_id: ChainId,
        /// Chain version after this commit.
        version: u64,
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
        /// Transfer time.
        at: Timestamp,
    },

    /// A consumer registered with the ownership ledger.
    ConsumerRegistered {
        /// Registered identity.
        consumer: Address,
    },
}

impl CustodyEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ChainCreated { .. } | Self::CustodyExtended { .. } => EventTopic::Custody,
            Self::ChainDelivered { .. } => EventTopic::Delivery,
            Self::OwnershipTransferred { .. } => EventTopic::Ownership,
            Self::ConsumerRegistered { .. } => EventTopic::Consumers,
        }
    }

    /// Chain this event refers to, if any.
    #[must_use]
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::ChainCreated { chain_id, .. }
            | Self::CustodyExtended { chain_id, .. }
            | Self::ChainDelivered { chain_id, .. }
            | Self::OwnershipTransferred { chain_id, .. } => Some(*chain_id),
            Self::ConsumerRegistered { .. } => None,
        }
    }

    /// Chain version this event brings its chain to, if chain-scoped.
    #[must_use]
    pub fn chain_version(&self) -> Option<u64> {
        match self {
            Self::ChainCreated { version, .. }
            | Self::CustodyExtended { version, .. }
            | Self::ChainDelivered { version, .. }
            | Self::OwnershipTransferred { version, .. } => Some(*version),
            Self::ConsumerRegistered { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Chain creation and intermediate hand-offs.
    Custody,
    /// Chain closed to a consumer.
    Delivery,
    /// Consumer-to-consumer transfers.
    Ownership,
    /// Consumer registrations.
    Consumers,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Chains to include. Empty means all chains; events without a chain
    /// only pass when this is empty.
    pub chain_ids: Vec<ChainId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            chain_ids: Vec::new(),
        }
    }

    /// Create a filter for events about specific chains.
    #[must_use]
    pub fn for_chains(chain_ids: Vec<ChainId>) -> Self {
        Self {
            topics: Vec::new(),
            chain_ids,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &CustodyEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let chain_match = self.chain_ids.is_empty()
            || event
                .chain_id()
                .is_some_and(|id| self.chain_ids.contains(&id));

        topic_match && chain_match
    }
}
