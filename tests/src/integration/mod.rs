//! # Integration Tests
//!
//! Cross-subsystem flows over the real catalog, role registry and custody
//! ledger.

pub mod flows;
