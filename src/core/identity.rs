//! Record identity: hashed time-plus-randomness identifiers

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Wire value stored in `items.place_id` when an item has no assigned place.
///
/// Kept so existing database files stay readable; in memory the association
/// is an `Option<RecordId>` instead of a shared dummy record.
pub const UNASSIGNED_PLACE_ID: &str = "-1";

/// A unique identifier for a place or item row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier from the current wall-clock time plus
    /// 16 random bits, hashed to a fixed-length hex string.
    ///
    /// Collisions are only probabilistically excluded, which is acceptable
    /// for a single-writer desktop database.
    pub fn generate() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let salt: u16 = rand::random();
        let seed = format!("{}.{:09}+{}", now.as_secs(), now.subsec_nanos(), salt);
        Self(format!("{:x}", Sha256::digest(seed.as_bytes())))
    }

    /// Wrap an identifier loaded from storage.
    ///
    /// Stored ids are accepted as-is: old databases may contain ids of any
    /// shape and the store never enforced uniqueness.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Errors that can occur when parsing record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("record id must not be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = RecordId::generate();
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_distinct() {
        // Probabilistic, not guaranteed - but two back-to-back calls
        // colliding would mean the random salt and the clock both matched.
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: RecordId = " abc123 ".parse().unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = "   ".parse::<RecordId>().unwrap_err();
        assert!(matches!(err, IdParseError::Empty));
    }

    #[test]
    fn test_sentinel_round_trips_as_id() {
        let id = RecordId::from_stored(UNASSIGNED_PLACE_ID);
        assert_eq!(id.as_str(), "-1");
    }

    #[test]
    fn test_serde_transparent() {
        let id = RecordId::from_stored("deadbeef");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deadbeef\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
