//! # Domain Entities
//!
//! Chain records, their custody entries, and consumers.

use super::value_objects::{ChainStatus, ConsumerView, OwnershipTransfer};
use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, ContactProfile, ItemId, Timestamp};

/// One hand-off record in a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEntry {
    /// Identity holding the item at this step.
    pub custodian: Address,
    /// When the custodian received the item.
    pub received_at: Timestamp,
    /// Next custodian. `None` on the closing entry.
    pub intended_recipient: Option<Address>,
    /// When the item was handed off. `None` on the closing entry.
    pub handoff_at: Option<Timestamp>,
}

impl CustodyEntry {
    /// Entry that names the next custodian.
    pub fn handoff(
        custodian: Address,
        received_at: Timestamp,
        intended_recipient: Address,
        handoff_at: Timestamp,
    ) -> Self {
        Self {
            custodian,
            received_at,
            intended_recipient: Some(intended_recipient),
            handoff_at: Some(handoff_at),
        }
    }

    /// Terminal entry written when the chain closes to a consumer.
    pub fn terminal(custodian: Address, received_at: Timestamp) -> Self {
        Self {
            custodian,
            received_at,
            intended_recipient: None,
            handoff_at: None,
        }
    }
}

/// The custody history of one physical unit.
///
/// Records are never removed once created and `custody_entries` only grows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// Ledger-assigned id.
    pub chain_id: ChainId,
    /// Catalog item this unit is an instance of.
    pub item_id: ItemId,
    /// Lifecycle status.
    pub status: ChainStatus,
    /// Hand-off history, oldest first.
    pub custody_entries: Vec<CustodyEntry>,
    /// Consumer owning the item. `None` while in the custody chain.
    pub current_owner: Option<Address>,
    /// Consumer-to-consumer transfers after delivery, oldest first.
    pub ownership_history: Vec<OwnershipTransfer>,
}

impl ChainRecord {
    /// New record holding the manufacturer's opening entry.
    pub fn open(chain_id: ChainId, item_id: ItemId, first: CustodyEntry) -> Self {
        Self {
            chain_id,
            item_id,
            status: ChainStatus::InCustodyChain,
            custody_entries: vec![first],
            current_owner: None,
            ownership_history: Vec::new(),
        }
    }

    /// Most recent custody entry.
    pub fn last_entry(&self) -> Option<&CustodyEntry> {
        self.custody_entries.last()
    }

    /// Identity the last custodian handed off to.
    pub fn pending_recipient(&self) -> Option<Address> {
        self.last_entry().and_then(|entry| entry.intended_recipient)
    }

    /// Position the next appended entry will occupy.
    pub fn next_position(&self) -> usize {
        self.custody_entries.len()
    }

    /// Committed mutations so far: one per custody entry plus one per
    /// ownership transfer. Starts at 1 and never decreases.
    pub fn version(&self) -> u64 {
        (self.custody_entries.len() + self.ownership_history.len()) as u64
    }

    pub(crate) fn append(&mut self, entry: CustodyEntry) {
        self.custody_entries.push(entry);
    }

    /// Append the terminal entry and hand ownership to `consumer`.
    pub(crate) fn deliver(&mut self, entry: CustodyEntry, consumer: Address) {
        debug_assert!(self.status.can_transition_to(ChainStatus::Delivered));
        self.custody_entries.push(entry);
        self.status = ChainStatus::Delivered;
        self.current_owner = Some(consumer);
    }

    /// Move ownership between consumers.
    pub(crate) fn reassign(&mut self, transfer: OwnershipTransfer) {
        debug_assert!(self.status.can_transition_to(ChainStatus::Reowned));
        self.status = ChainStatus::Reowned;
        self.current_owner = Some(transfer.to);
        self.ownership_history.push(transfer);
    }
}

/// A registered end consumer and the chains they own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumer {
    /// Consumer identity.
    pub identity: Address,
    /// Display data.
    pub profile: ContactProfile,
    /// Owned chains in acquisition order, without duplicates.
    pub held_items: Vec<ChainId>,
}

impl Consumer {
    /// Consumer owning nothing.
    pub fn new(identity: Address, profile: ContactProfile) -> Self {
        Self {
            identity,
            profile,
            held_items: Vec::new(),
        }
    }

    /// Whether `chain_id` is held.
    pub fn holds(&self, chain_id: ChainId) -> bool {
        self.held_items.contains(&chain_id)
    }

    /// Add `chain_id` to the held set. A repeat is a no-op.
    pub(crate) fn record_delivery(&mut self, chain_id: ChainId) {
        if !self.holds(chain_id) {
            self.held_items.push(chain_id);
        }
    }

    /// Remove `chain_id` from the held set, keeping the order of the rest.
    pub(crate) fn release(&mut self, chain_id: ChainId) {
        self.held_items.retain(|held| *held != chain_id);
    }

    /// Read-only view for queries.
    pub fn view(&self) -> ConsumerView {
        ConsumerView {
            identity: self.identity,
            profile: self.profile.clone(),
            held_items: self.held_items.clone(),
        }
    }
}

/// Point-in-time copy of the whole ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Every chain record, by ascending id.
    pub chains: Vec<ChainRecord>,
    /// Every consumer, by ascending identity.
    pub consumers: Vec<Consumer>,
}
