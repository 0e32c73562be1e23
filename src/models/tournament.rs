//! Tournament model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, TournamentId};

/// A Swiss-system tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique identifier
    pub id: TournamentId,

    /// Tournament name (need not be unique)
    pub name: String,

    /// When this tournament was created
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new Tournament with a random ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(EntityId::random(), name)
    }

    pub fn with_id(id: impl Into<TournamentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_creation() {
        let t = Tournament::new("Spring Open");
        assert_eq!(t.name, "Spring Open");
        assert!(!t.id.as_str().is_empty());
    }

    #[test]
    fn test_tournament_serialization() {
        let t = Tournament::with_id("t-1", "Spring Open");
        let json = serde_json::to_string(&t).unwrap();
        let back: Tournament = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
