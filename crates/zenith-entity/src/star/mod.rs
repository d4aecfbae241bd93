//! Stars (favorites).

pub mod model;

pub use model::{CreateStar, ResourceType, Star};
