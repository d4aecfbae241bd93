//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// Result of queueing a message on one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message is queued for the socket writer.
    Queued,
    /// The queue is full; the message was dropped for this connection.
    Dropped,
    /// The socket writer is gone.
    Closed,
}

/// A handle to a single WebSocket connection.
///
/// Holds the sender half of the connection's outbound queue. The socket
/// task owns the receiver and writes whatever arrives to the client.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Sender for serialized outbound messages
    sender: mpsc::Sender<String>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Queue a message without waiting.
    pub fn send(&self, msg: String) -> SendOutcome {
        if !self.is_alive() {
            return SendOutcome::Closed;
        }
        match self.sender.try_send(msg) {
            Ok(()) => SendOutcome::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping message");
                SendOutcome::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                SendOutcome::Closed
            }
        }
    }

    /// Check if connection is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as closed
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
