//! Event publisher trait connecting the service layer to fan-out.

use crate::events::DomainEvent;

/// Sink for domain events.
///
/// Publishing is best-effort and never fails the operation that raised
/// the event. The return value is the number of receivers reached.
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    /// Publish an event to every current subscriber.
    fn publish(&self, event: &DomainEvent) -> usize;
}

/// Publisher that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _event: &DomainEvent) -> usize {
        0
    }
}
