//! storeman: a small inventory manager
//!
//! Catalogs storage places (boxes, shelves) and the items kept in them,
//! persisted in a local SQLite database.

pub mod cli;
pub mod core;
pub mod entities;
