//! Command implementations

pub mod completions;
pub mod item;
pub mod place;
pub mod search;
