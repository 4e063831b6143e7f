//! StoragePlace entity type

use serde::{Deserialize, Serialize};

use crate::core::identity::RecordId;

/// A place where stuff can be stored (a box, a shelf, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoragePlace {
    /// Unique identifier
    pub id: RecordId,

    /// Display name
    pub name: String,

    /// Where the place itself is (a room, a wall, ...)
    pub location: String,

    /// Kind of place; persisted in the `type` column
    #[serde(rename = "type")]
    pub kind: String,
}

impl StoragePlace {
    /// Create a new place with a freshly generated id
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            name: name.into(),
            location: location.into(),
            kind: kind.into(),
        }
    }

    /// Default field values for interactive creation
    pub fn placeholder() -> Self {
        Self::new("Name", "Location", "Type")
    }
}

impl std::fmt::Display for StoragePlace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} @ {} ({})",
            self.id, self.name, self.location, self.kind
        )
    }
}
