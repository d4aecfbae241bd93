//! File domain entities.

pub mod model;

pub use model::{CreateFile, File, RecentFile};
