//! Service layer for the item store.
//! - Owns the domain model and its validation.
//! - Separates storage behind the `ItemStore` trait.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod items;
pub mod pagination;
