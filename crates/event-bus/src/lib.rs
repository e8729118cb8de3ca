use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait implemented by payload types that can be carried on the bus.
pub trait Event: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Event for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("no subscribers attached to the bus")]
    NoSubscribers,
}

/// Message bus between the observing context and the display context.
///
/// Publishing never blocks: the capture core runs inside document callbacks and
/// must hand a message over synchronously.
pub trait EventBus<E>: Send + Sync
where
    E: Event,
{
    /// Returns the number of subscribers that received the event.
    fn publish(&self, event: E) -> Result<usize, BusError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// Broadcast-backed bus used by the CLI and by tests.
pub struct InMemoryBus<E>
where
    E: Event,
{
    sender: broadcast::Sender<E>,
}

impl<E> InMemoryBus<E>
where
    E: Event,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Event,
{
    fn publish(&self, event: E) -> Result<usize, BusError> {
        self.sender.send(event).map_err(|_| BusError::NoSubscribers)
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

/// Collect everything currently queued on a subscription without waiting.
///
/// Messages dropped because the subscriber lagged are reported and skipped.
pub fn drain<E>(rx: &mut broadcast::Receiver<E>) -> Vec<E>
where
    E: Event,
{
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(ev) => out.push(ev),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "bus subscriber lagged; messages dropped");
            }
            Err(broadcast::error::TryRecvError::Empty)
            | Err(broadcast::error::TryRecvError::Closed) => break,
        }
    }
    debug!(count = out.len(), "drained bus subscription");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_reports_error() {
        let bus = InMemoryBus::<u32>::new(4);
        assert_eq!(bus.publish(1), Err(BusError::NoSubscribers));
    }

    #[test]
    fn drain_returns_messages_in_publish_order() {
        let bus = InMemoryBus::<&'static str>::new(8);
        let mut rx = bus.subscribe();
        bus.publish("a").unwrap();
        bus.publish("b").unwrap();
        assert_eq!(drain(&mut rx), vec!["a", "b"]);
        assert!(drain(&mut rx).is_empty());
    }
}
