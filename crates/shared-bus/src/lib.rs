//! # Shared Bus - Custody Event Bus
//!
//! Carries committed ledger events from the custody subsystem to any
//! interested party (indexers, notification services, audit trails).
//!
//! ## Choreography Pattern
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Custody Ledger   │                    │  Subscriber  │
//! │                  │    publish()       │              │
//! │                  │ ──────┐            │              │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! Events are published only after the mutation they describe has been
//! applied, so a subscriber never sees an event for a rejected call.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{CustodyEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Events buffered per subscriber before the oldest are lost to lag.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
