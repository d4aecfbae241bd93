//! Merged folder/file listings.
//!
//! Folders and files stay distinct entities. They meet only at the
//! listing boundary, as an [`Item`] tagged with `"type"`.

pub mod listing;
pub mod resource;

pub use listing::{Item, ItemEntry, ItemLists};
pub use resource::Resource;
