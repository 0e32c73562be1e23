//! Player and standings models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EntityId, PlayerId};

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name (need not be unique)
    pub name: String,
}

impl Player {
    /// Create a new Player with a random ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::random(),
            name: name.into(),
        }
    }

    /// Create a Player with a known ID.
    pub fn with_id(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One row of the standings table.
///
/// The order of a standings list is decided by whoever produced it; the
/// pairing engine never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub player: Player,

    /// Matches won (draws and byes excluded)
    pub wins: u32,

    /// Matches played (byes excluded)
    pub matches: u32,

    /// Sum of the current wins of every opponent faced
    pub opponent_wins: u32,
}

impl StandingsEntry {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            wins: 0,
            matches: 0,
            opponent_wins: 0,
        }
    }

    pub fn with_record(mut self, wins: u32, matches: u32) -> Self {
        self.wins = wins;
        self.matches = matches;
        self
    }

    pub fn with_opponent_wins(mut self, opponent_wins: u32) -> Self {
        self.opponent_wins = opponent_wins;
        self
    }

    pub fn losses_or_draws(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let alice = Player::new("Alice");
        let other_alice = Player::new("Alice");

        assert_eq!(alice.name, "Alice");
        assert_ne!(alice.id, other_alice.id);
    }

    #[test]
    fn test_player_with_id() {
        let bob = Player::with_id("p-2", "Bob");
        assert_eq!(bob.id.as_str(), "p-2");
        assert_eq!(format!("{}", bob), "Bob (p-2)");
    }

    #[test]
    fn test_standings_entry_builders() {
        let entry = StandingsEntry::new(Player::with_id("p-1", "Alice"))
            .with_record(2, 3)
            .with_opponent_wins(4);

        assert_eq!(entry.wins, 2);
        assert_eq!(entry.matches, 3);
        assert_eq!(entry.opponent_wins, 4);
        assert_eq!(entry.losses_or_draws(), 1);
    }

    #[test]
    fn test_standings_entry_serialization() {
        let entry = StandingsEntry::new(Player::with_id("p-1", "Alice")).with_record(1, 1);
        let json = serde_json::to_string(&entry).unwrap();
        let back: StandingsEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
