//! # zenith-realtime
//!
//! Real-time fan-out for Zenith Drive. Provides:
//!
//! - A registry of open WebSocket connections, each with a bounded
//!   outbound queue
//! - The wire format of server-pushed messages
//! - A broadcaster that turns domain events into pushes to every
//!   connection
//!
//! The socket itself is driven by the API crate; this crate never touches
//! the transport.

pub mod bridge;
pub mod connection;
pub mod message;
pub mod server;

pub use bridge::broadcaster::Broadcaster;
pub use connection::registry::ConnectionRegistry;
pub use message::types::OutboundMessage;
pub use server::RealtimeEngine;
