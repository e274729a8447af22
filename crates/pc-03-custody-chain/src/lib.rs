//! # PC-03 Custody Chain
//!
//! Tamper-evident custody ledger for physical units of catalog items.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Records every hand-off of a unit from its manufacturer through the
//! configured intermediate roles to a retailer, and from the retailer to a
//! consumer. After delivery, ownership moves only between registered
//! consumers.
//!
//! ## Transfer Authorization
//!
//! Only the identity named by the previous custodian may write the next
//! entry, and only while it is an active holder of the role for that
//! position. The check is re-run on every call against the live registry.
//!
//! ```text
//! InCustodyChain --close_to_consumer--> Delivered --transfer--> Reowned --transfer--> Reowned
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! pc-03-custody-chain/
//! ├── domain/          # ChainRecord, Consumer, ChainStatus, errors, invariants
//! ├── algorithms/      # Transfer authorization predicate
//! ├── ports/           # CustodyChainApi, OwnershipApi, collaborator gateways
//! ├── adapters/        # Gateways over pc-01 and pc-02
//! ├── state.rs         # Lock layout
//! ├── service.rs       # CustodyChainService
//! ├── config.rs        # CustodyConfig
//! └── metrics.rs       # Prometheus counters (feature `metrics`)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;
mod state;

// Re-exports
pub use algorithms::AuthorizationDecision;
pub use config::CustodyConfig;
pub use domain::{
    ChainRecord, ChainStatus, Consumer, ConsumerView, CustodyEntry, CustodyError,
    CustodyResult, DenialReason, LedgerSnapshot, OwnershipTransfer, StepKind,
};
pub use ports::{CustodyChainApi, ItemCatalogGateway, OwnershipApi, RoleRegistryGateway};
pub use service::CustodyChainService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
