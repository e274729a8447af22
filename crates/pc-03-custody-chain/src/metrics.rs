//! # Custody Metrics
//!
//! Prometheus counters for the custody ledger.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! pc-03-custody-chain = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `custody_chains_created_total` - Counter of chains opened
//! - `custody_entries_appended_total` - Counter of custody entries written (all steps)
//! - `custody_deliveries_total` - Counter of chains closed to a consumer
//! - `custody_transfers_total` - Counter of consumer-to-consumer transfers
//! - `custody_rejections_total` - Counter of rejected calls (by reason)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total chains opened
    pub static ref CHAINS_CREATED: IntCounter = register_int_counter!(
        "custody_chains_created_total",
        "Total number of custody chains opened"
    )
    .expect("Failed to create CHAINS_CREATED metric");

    /// Total custody entries appended
    pub static ref ENTRIES_APPENDED: IntCounter = register_int_counter!(
        "custody_entries_appended_total",
        "Total number of custody entries appended"
    )
    .expect("Failed to create ENTRIES_APPENDED metric");

    /// Total deliveries to consumers
    pub static ref DELIVERIES: IntCounter = register_int_counter!(
        "custody_deliveries_total",
        "Total number of chains closed to a consumer"
    )
    .expect("Failed to create DELIVERIES metric");

    /// Total ownership transfers
    pub static ref TRANSFERS: IntCounter = register_int_counter!(
        "custody_transfers_total",
        "Total number of consumer-to-consumer transfers"
    )
    .expect("Failed to create TRANSFERS metric");

    /// Total rejected calls, labeled by reason
    pub static ref REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "custody_rejections_total",
        "Total number of rejected custody calls",
        &["reason"]
    )
    .expect("Failed to create REJECTIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a chain opened (its first entry included)
#[cfg(feature = "metrics")]
pub fn record_chain_created() {
    CHAINS_CREATED.inc();
    ENTRIES_APPENDED.inc();
}

/// Record an intermediate custody entry
#[cfg(feature = "metrics")]
pub fn record_entry_appended() {
    ENTRIES_APPENDED.inc();
}

/// Record a delivery (its terminal entry included)
#[cfg(feature = "metrics")]
pub fn record_delivery() {
    DELIVERIES.inc();
    ENTRIES_APPENDED.inc();
}

/// Record an ownership transfer
#[cfg(feature = "metrics")]
pub fn record_transfer() {
    TRANSFERS.inc();
}

/// Record a rejected call with reason
#[cfg(feature = "metrics")]
pub fn record_rejection(reason: &str) {
    REJECTIONS.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// No-op
#[cfg(not(feature = "metrics"))]
pub fn record_chain_created() {}

/// No-op
#[cfg(not(feature = "metrics"))]
pub fn record_entry_appended() {}

/// No-op
#[cfg(not(feature = "metrics"))]
pub fn record_delivery() {}

/// No-op
#[cfg(not(feature = "metrics"))]
pub fn record_transfer() {}

/// No-op
#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_reason: &str) {}
