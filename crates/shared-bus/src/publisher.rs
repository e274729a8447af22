//! # Event Publisher
//!
//! Publishing side of the custody bus.

use crate::events::{CustodyEvent, EventFilter};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Sink for committed ledger events.
///
/// The custody ledger calls this after a mutation has been committed;
/// publishing never influences whether the mutation succeeded.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event`, returning how many subscribers it reached.
    async fn publish(&self, event: CustodyEvent) -> usize;

    /// Total events handed to `publish`, delivered or not.
    fn events_published(&self) -> u64;
}

/// Broadcast bus kept in process memory.
///
/// Every subscriber sees every event in publication order and filters on
/// receipt. Events published while nobody listens are counted and dropped.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<CustodyEvent>,
    capacity: usize,
    published: AtomicU64,
    unheard: AtomicU64,
}

impl InMemoryEventBus {
    /// Bus buffering `DEFAULT_CHANNEL_CAPACITY` events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            capacity,
            published: AtomicU64::new(0),
            unheard: AtomicU64::new(0),
        }
    }

    /// Receive every later event that matches `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, chains = ?filter.chain_ids, "Custody subscription opened");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Same as `subscribe`, as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        self.subscribe(filter).into_stream()
    }

    /// Live subscriptions and streams.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events published while no subscriber was listening.
    #[must_use]
    pub fn events_unheard(&self) -> u64 {
        self.unheard.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: CustodyEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let topic = event.topic();
        let chain_id = event.chain_id();

        let reached = self.sender.send(event).unwrap_or_else(|_| {
            self.unheard.fetch_add(1, Ordering::Relaxed);
            0
        });
        debug!(?topic, ?chain_id, reached, "Custody event published");
        reached
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
