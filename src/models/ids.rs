//! Entity identifiers.
//!
//! Players and tournaments get random ids since names need not be unique.
//! Match records get content-derived ids so the same result reported twice
//! collapses to the same id.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// An opaque entity ID.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new EntityId from an existing id string.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generate a fresh random EntityId.
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Generate an EntityId from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type alias for player IDs
pub type PlayerId = EntityId;

/// Type alias for tournament IDs
pub type TournamentId = EntityId;

/// Type alias for match record IDs
pub type MatchId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_deterministic() {
        let id1 = EntityId::generate(&["tournament-1", "2", "alice", "bob"]);
        let id2 = EntityId::generate(&["tournament-1", "2", "alice", "bob"]);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_generate_field_order_matters() {
        let id1 = EntityId::generate(&["tournament-1", "2", "alice", "bob"]);
        let id2 = EntityId::generate(&["tournament-1", "2", "bob", "alice"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generate_length_and_hex() {
        let id = EntityId::generate(&["test", "input"]);
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_ids_are_unique() {
        let a = EntityId::random();
        let b = EntityId::random();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::from("player-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"player-7\"");

        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_debug() {
        let id = EntityId::new("abc123".to_string());
        assert_eq!(format!("{}", id), "abc123");
        assert_eq!(format!("{:?}", id), "EntityId(abc123)");
    }
}
