//! Entity types: storage places and the items kept in them

pub mod item;
pub mod place;

pub use item::Item;
pub use place::StoragePlace;
