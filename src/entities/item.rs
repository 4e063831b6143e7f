//! Item entity type

use serde::{Deserialize, Serialize};

use crate::core::identity::RecordId;

/// An arbitrary item that can be kept in a [`StoragePlace`].
///
/// The place association is by id only and non-owning: the referenced place
/// may have been deleted, in which case the item is orphaned but keeps its
/// stored `place_id` unchanged.
///
/// [`StoragePlace`]: crate::entities::StoragePlace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: RecordId,

    /// Display name
    pub name: String,

    /// Free-text details
    pub details: String,

    /// Piece count; no minimum is enforced, negative and zero are accepted
    pub amount: i64,

    /// Owning place, if any
    #[serde(default)]
    pub place_id: Option<RecordId>,
}

impl Item {
    /// Create a new item with a freshly generated id
    pub fn new(
        name: impl Into<String>,
        details: impl Into<String>,
        amount: i64,
        place_id: Option<RecordId>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            details: details.into(),
            amount,
            place_id,
        }
    }

    /// Default field values for interactive creation: no place assigned
    pub fn placeholder() -> Self {
        Self::new("Name", "Details", 1, None)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({}, {} pcs.)",
            self.id, self.name, self.details, self.amount
        )
    }
}
