//! Real-time WebSocket configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) broadcaster configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound queue length per connection. A full queue drops messages.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// WebSocket ping interval in seconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            ping_interval_seconds: default_ping_interval(),
        }
    }
}

fn default_channel_buffer() -> usize {
    64
}

fn default_ping_interval() -> u64 {
    30
}
