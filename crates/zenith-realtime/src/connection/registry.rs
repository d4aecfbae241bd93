//! Connection registry: every open socket, keyed by connection id.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::handle::{ConnectionHandle, ConnectionId, SendOutcome};

/// Thread-safe map of all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// Connection ID → handle.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Outbound queue length per connection.
    buffer_size: usize,
}

impl ConnectionRegistry {
    /// Creates an empty registry whose connections queue up to
    /// `buffer_size` messages.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            connections: DashMap::new(),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Registers a new connection.
    ///
    /// Returns the handle and the receiver the socket writer drains.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ConnectionHandle::new(tx));
        self.connections.insert(handle.id, handle.clone());

        info!(
            conn_id = %handle.id,
            total = self.connections.len(),
            "WebSocket connection registered"
        );
        (handle, rx)
    }

    /// Removes a connection. Unknown ids are ignored.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some((_, handle)) = self.connections.remove(conn_id) {
            handle.mark_closed();
            info!(
                conn_id = %conn_id,
                total = self.connections.len(),
                "WebSocket connection unregistered"
            );
        }
    }

    /// Queues `msg` on every connection.
    ///
    /// Connections whose writer has gone away are unregistered. Returns
    /// the number of connections the message was queued on.
    pub fn broadcast(&self, msg: &str) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        for entry in self.connections.iter() {
            match entry.value().send(msg.to_string()) {
                SendOutcome::Queued => delivered += 1,
                SendOutcome::Dropped => {}
                SendOutcome::Closed => closed.push(*entry.key()),
            }
        }

        // Removing while iterating would deadlock the shard.
        for conn_id in &closed {
            self.unregister(conn_id);
        }

        debug!(delivered, pruned = closed.len(), "Broadcast complete");
        delivered
    }

    /// Closes and forgets every connection.
    pub fn close_all(&self) {
        let count = self.connections.len();
        for entry in self.connections.iter() {
            entry.value().mark_closed();
        }
        self.connections.clear();
        info!(count, "All connections closed");
    }

    /// Returns the number of active connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether `conn_id` is registered.
    pub fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.connections.contains_key(conn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_reaches_every_connection() {
        let registry = ConnectionRegistry::new(8);
        let (_a, mut rx_a) = registry.register();
        let (_b, mut rx_b) = registry.register();

        assert_eq!(registry.broadcast("hello"), 2);
        assert_eq!(rx_a.try_recv().unwrap(), "hello");
        assert_eq!(rx_b.try_recv().unwrap(), "hello");
    }

    #[test]
    fn closed_connections_are_pruned() {
        let registry = ConnectionRegistry::new(8);
        let (gone, rx_gone) = registry.register();
        let (_kept, mut rx_kept) = registry.register();
        drop(rx_gone);

        assert_eq!(registry.broadcast("ping"), 1);
        assert!(!registry.contains(&gone.id));
        assert_eq!(registry.connection_count(), 1);
        assert_eq!(rx_kept.try_recv().unwrap(), "ping");
    }

    #[test]
    fn full_queue_skips_only_that_connection() {
        let registry = ConnectionRegistry::new(1);
        let (slow, _rx_slow) = registry.register();
        assert_eq!(registry.broadcast("first"), 1);
        assert_eq!(registry.broadcast("second"), 0);
        assert!(registry.contains(&slow.id));
    }

    #[test]
    fn unregister_and_close_all() {
        let registry = ConnectionRegistry::new(4);
        let (a, _rx_a) = registry.register();
        let (b, _rx_b) = registry.register();

        registry.unregister(&a.id);
        assert!(!a.is_alive());
        assert_eq!(registry.connection_count(), 1);

        registry.close_all();
        assert!(!b.is_alive());
        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.broadcast("late"), 0);
    }
}
