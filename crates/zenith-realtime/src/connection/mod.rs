//! Connection tracking.

pub mod handle;
pub mod registry;

pub use handle::{ConnectionHandle, ConnectionId, SendOutcome};
pub use registry::ConnectionRegistry;
