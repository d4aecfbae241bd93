//! File-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to file operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileEvent {
    /// A file was uploaded and its metadata row committed.
    Created {
        /// The file ID.
        file_id: Uuid,
        /// The owner of the new file.
        owner_id: Uuid,
        /// The committed file row, serialized.
        record: serde_json::Value,
    },
}
