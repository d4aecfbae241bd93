//! Domain event bridge.

pub mod broadcaster;

pub use broadcaster::Broadcaster;
