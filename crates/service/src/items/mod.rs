//! Items: the single resource of the service.
//!
//! An item has no stored identity. Its id is its zero-based position in
//! insertion order, which stays valid only because items are never deleted
//! or reordered. Adding either operation would require a generated id.

pub mod domain;
pub mod store;

pub use domain::{parse_position, Item, NewItem};
pub use store::{Created, ItemStore, MemoryItemStore};
