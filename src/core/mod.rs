//! Core module - identity, persistence, and the in-memory catalog

pub mod catalog;
pub mod config;
pub mod identity;
pub mod store;

pub use catalog::{Catalog, CatalogError, EditOutcome, ItemRow};
pub use config::Config;
pub use identity::{IdParseError, RecordId, UNASSIGNED_PLACE_ID};
pub use store::Store;
