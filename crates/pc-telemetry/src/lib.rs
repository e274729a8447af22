//! # Provenance-Chain Telemetry
//!
//! Structured logging for every subsystem, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_subsystem("03", "custody-chain");
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `provenance-chain` | Service name in logs |
//! | `PC_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `PC_SUBSYSTEM_ID` | `00` | Subsystem identifier |
//! | `PC_JSON_LOGS` | `false` | Emit JSON lines |
//! | `PC_CONSOLE_OUTPUT` | `true` | Print to stdout |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// Filter directive could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A global subscriber is already installed.
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use pc_telemetry::subsystem_span;
///
/// fn close_chain(chain_id: u64) {
///     let _span = subsystem_span!("close_chain", subsystem = "custody", chain_id).entered();
/// }
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
