//! # Event Subscriber
//!
//! Receiving side of the custody bus. A subscriber that falls more than the
//! channel capacity behind loses the oldest events; the loss is counted so
//! an event-sourced consumer knows to rebuild from a ledger snapshot.

use crate::events::{CustodyEvent, EventFilter};
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::{Stream, StreamExt};
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was dropped and every buffered event consumed.
    #[error("Event bus closed")]
    Closed,
}

/// Filtered handle onto the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<CustodyEvent>,
    filter: EventFilter,
    missed: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<CustodyEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            missed: 0,
        }
    }

    /// Wait for the next matching event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<CustodyEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(count)) => self.note_missed(count),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<CustodyEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(count)) => self.note_missed(count),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// Events of any kind lost to lag since this subscription was created.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// The filter this subscription applies.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    fn note_missed(&mut self, count: u64) {
        self.missed += count;
        warn!(
            lagged = count,
            total_missed = self.missed,
            "Subscriber lagged; custody events lost"
        );
    }

    /// Convert into a `Stream` of matching events.
    #[must_use]
    pub fn into_stream(self) -> EventStream {
        let filter = self.filter.clone();
        let inner = BroadcastStream::new(self.receiver).filter_map(move |item| match item {
            Ok(event) if filter.matches(&event) => Some(event),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(count)) => {
                warn!(lagged = count, "Event stream lagged; custody events lost");
                None
            }
        });
        EventStream {
            inner: Box::pin(inner),
        }
    }
}

/// Stream of matching events, ending when the bus is dropped.
pub struct EventStream {
    inner: Pin<Box<dyn Stream<Item = CustodyEvent> + Send>>,
}

impl Stream for EventStream {
    type Item = CustodyEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
