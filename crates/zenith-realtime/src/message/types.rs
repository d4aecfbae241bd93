//! Server-to-client message types.

use serde::{Deserialize, Serialize};

/// Messages sent from server to client.
///
/// Serialized as `{"type": "FILE_CREATED", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    /// A file was uploaded. The payload is the listing row of the file.
    FileCreated(serde_json::Value),
}

impl OutboundMessage {
    /// Serialize for the wire.
    pub fn to_text(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
