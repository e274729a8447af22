//! Driving Ports (API - Inbound)
//!
//! Callers pass their own identity explicitly; nothing is read from ambient
//! context.

use crate::domain::{ChainRecord, ConsumerView, CustodyResult};
use async_trait::async_trait;
use shared_types::{Address, ChainId, ContactProfile, ItemId, Timestamp};

/// Custody chain ledger - inbound port.
#[async_trait]
pub trait CustodyChainApi: Send + Sync {
    /// Open a chain for a catalog item with the creator's first entry.
    ///
    /// # Errors
    ///
    /// `UnknownItem`, `UnauthorizedRole`.
    async fn create_chain(
        &self,
        item_id: ItemId,
        created_by: Address,
        received_at: Timestamp,
        intended_recipient: Address,
        handoff_at: Timestamp,
    ) -> CustodyResult<ChainId>;

    /// Append an intermediate entry written by the pending recipient.
    ///
    /// # Errors
    ///
    /// `NoSuchChain`, `ChainClosed`, `UnauthorizedCustodian`.
    async fn extend_chain(
        &self,
        caller: Address,
        chain_id: ChainId,
        received_at: Timestamp,
        next_recipient: Address,
        handoff_at: Timestamp,
    ) -> CustodyResult<()>;

    /// Append the terminal entry and deliver the item to `consumer`.
    ///
    /// # Errors
    ///
    /// `NoSuchChain`, `ChainClosed`, `UnauthorizedCustodian`, `UnknownConsumer`.
    async fn close_to_consumer(
        &self,
        caller: Address,
        chain_id: ChainId,
        consumer: Address,
        delivered_at: Timestamp,
    ) -> CustodyResult<()>;

    /// Copy of a chain record.
    fn get_chain(&self, chain_id: ChainId) -> CustodyResult<ChainRecord>;

    /// Every chain opened for `item_id`, oldest first.
    fn chains_for_item(&self, item_id: ItemId) -> Vec<ChainId>;

    /// Number of chains ever opened.
    fn chain_count(&self) -> u64;

    /// Re-check the invariants of one chain against the current ledger.
    fn audit_chain(&self, chain_id: ChainId) -> CustodyResult<()>;
}

/// Consumer registry and ownership ledger - inbound port.
#[async_trait]
pub trait OwnershipApi: Send + Sync {
    /// Register a consumer.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered`.
    async fn register_consumer(
        &self,
        identity: Address,
        profile: ContactProfile,
    ) -> CustodyResult<()>;

    /// Consumer profile and held chains.
    fn get_consumer(&self, identity: &Address) -> CustodyResult<ConsumerView>;

    /// Move a delivered item from one consumer to another.
    ///
    /// # Errors
    ///
    /// `NoSuchChain`, `ChainClosed`, `NotOwner`, `UnauthorizedCustodian`,
    /// `SelfTransfer`, `UnknownConsumer`.
    async fn transfer_ownership(
        &self,
        caller: Address,
        chain_id: ChainId,
        from: Address,
        to: Address,
        at: Timestamp,
    ) -> CustodyResult<()>;
}
