//! Top-level real-time engine.

use std::sync::Arc;

use tracing::info;

use zenith_core::config::realtime::RealtimeConfig;
use zenith_core::traits::publisher::EventPublisher;

use crate::bridge::broadcaster::Broadcaster;
use crate::connection::registry::ConnectionRegistry;

/// Owns the connection registry and the broadcaster publishing into it.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Open connections.
    pub connections: Arc<ConnectionRegistry>,
    /// Domain event publisher backed by `connections`.
    pub broadcaster: Arc<Broadcaster>,
    /// Socket ping interval.
    pub ping_interval: std::time::Duration,
}

impl RealtimeEngine {
    /// Creates the engine from configuration.
    pub fn new(config: &RealtimeConfig) -> Self {
        let connections = Arc::new(ConnectionRegistry::new(config.channel_buffer_size));
        let broadcaster = Arc::new(Broadcaster::new(connections.clone()));

        info!(
            buffer = config.channel_buffer_size,
            "Real-time engine initialized"
        );

        Self {
            connections,
            broadcaster,
            ping_interval: std::time::Duration::from_secs(config.ping_interval_seconds.max(1)),
        }
    }

    /// The broadcaster as the service layer sees it.
    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        self.broadcaster.clone()
    }

    /// Closes every connection.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");
        self.connections.close_all();
    }
}
