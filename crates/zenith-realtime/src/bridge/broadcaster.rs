//! Domain event → socket push.

use std::sync::Arc;

use tracing::error;

use zenith_core::events::{DomainEvent, EventPayload, FileEvent};
use zenith_core::traits::publisher::EventPublisher;

use crate::connection::registry::ConnectionRegistry;
use crate::message::types::OutboundMessage;

/// Publishes domain events to every open connection.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl Broadcaster {
    /// Creates a broadcaster over `registry`.
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    fn outbound(event: &DomainEvent) -> OutboundMessage {
        match &event.payload {
            EventPayload::File(FileEvent::Created { record, .. }) => {
                OutboundMessage::FileCreated(record.clone())
            }
        }
    }
}

impl EventPublisher for Broadcaster {
    fn publish(&self, event: &DomainEvent) -> usize {
        let text = match Self::outbound(event).to_text() {
            Ok(text) => text,
            Err(e) => {
                error!(event_id = %event.id, error = %e, "Failed to serialize outbound message");
                return 0;
            }
        };
        self.registry.broadcast(&text)
    }
}
