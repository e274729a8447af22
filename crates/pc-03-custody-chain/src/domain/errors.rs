//! # Domain Errors
//!
//! Every error is a synchronous rejection. A call that returns an error has
//! left the ledger exactly as it found it.

use super::value_objects::ChainStatus;
use shared_types::{format_address, Address, ChainId, ItemId, Role};
use thiserror::Error;

/// Why the transfer authorization protocol refused a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialReason {
    /// Caller is not the identity the previous custodian handed off to.
    #[error("caller {} is not the intended recipient {}", format_address(.caller), format_address(.expected))]
    NotIntendedRecipient {
        /// Identity named by the previous entry.
        expected: Address,
        /// Identity that attempted the step.
        caller: Address,
    },

    /// The last entry names no next custodian.
    #[error("no hand-off is pending on this chain")]
    NoPendingRecipient,

    /// Caller is not a registered, unblocked holder of the role for this step.
    #[error("caller is not an active {role}")]
    InactiveRoleHolder {
        /// Role required at this position.
        role: Role,
    },

    /// The configured role sequence has no step of this kind at this position.
    #[error("no custody step of this kind at position {position}")]
    NoStepAtPosition {
        /// Position the entry would occupy.
        position: usize,
    },

    /// Caller is not the consumer that currently owns the item.
    #[error("caller {} is not the current owner", format_address(.caller))]
    NotCurrentOwner {
        /// Identity that attempted the transfer.
        caller: Address,
    },
}

/// Custody ledger error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    /// Item id is not in the catalog.
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// Creator is not an active holder of the opening role.
    #[error("Unauthorized role: caller is not an active {role}")]
    UnauthorizedRole {
        /// Role required to open a chain.
        role: Role,
    },

    /// Chain id was never allocated.
    #[error("No such chain: {0}")]
    NoSuchChain(ChainId),

    /// Mutation attempted on a chain not in the status it requires.
    #[error("Chain {chain_id} is closed for this operation (status {status:?})")]
    ChainClosed {
        /// Chain the call targeted.
        chain_id: ChainId,
        /// Status at the time of the call.
        status: ChainStatus,
    },

    /// Continuity or role check failed; the reason is reported verbatim.
    #[error("Unauthorized custodian: {0}")]
    UnauthorizedCustodian(DenialReason),

    /// Consumer identity is not registered.
    #[error("Unknown consumer: {}", format_address(.0))]
    UnknownConsumer(Address),

    /// Consumer identity already registered.
    #[error("Consumer already registered: {}", format_address(.0))]
    AlreadyRegistered(Address),

    /// Named sender is not the current owner.
    #[error("Not owner of chain {chain_id}")]
    NotOwner {
        /// Chain the call targeted.
        chain_id: ChainId,
    },

    /// Sender and recipient of a transfer are the same consumer.
    #[error("Cannot transfer chain {chain_id} to its current owner")]
    SelfTransfer {
        /// Chain the call targeted.
        chain_id: ChainId,
    },

    /// Configuration rejected at construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Restored or audited state breaks a ledger invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl CustodyError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownItem(_) => "unknown_item",
            Self::UnauthorizedRole { .. } => "unauthorized_role",
            Self::NoSuchChain(_) => "no_such_chain",
            Self::ChainClosed { .. } => "chain_closed",
            Self::UnauthorizedCustodian(_) => "unauthorized_custodian",
            Self::UnknownConsumer(_) => "unknown_consumer",
            Self::AlreadyRegistered(_) => "already_registered",
            Self::NotOwner { .. } => "not_owner",
            Self::SelfTransfer { .. } => "self_transfer",
            Self::InvalidConfig(_) => "invalid_config",
            Self::InvariantViolation(_) => "invariant_violation",
        }
    }
}

impl From<DenialReason> for CustodyError {
    fn from(reason: DenialReason) -> Self {
        Self::UnauthorizedCustodian(reason)
    }
}

/// Result alias for custody operations.
pub type CustodyResult<T> = Result<T, CustodyError>;
