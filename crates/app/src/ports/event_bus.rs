//! Event bus port — publish/subscribe for domain events.

use std::future::Future;

use roomlight_domain::event::Event;

/// Failure to hand an event to the bus.
#[derive(Debug, thiserror::Error)]
#[error("event bus closed")]
pub struct PublishError;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), PublishError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), PublishError>> + Send {
        (**self).publish(event)
    }
}
