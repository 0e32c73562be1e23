//! Match history model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, MatchId, PlayerId, TournamentId};

/// A recorded match result.
///
/// A record whose winner and loser are the same player is a bye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier (derived from tournament + round + players)
    pub id: MatchId,

    /// Tournament this match belongs to
    pub tournament_id: TournamentId,

    /// Round number (1-based)
    pub round: u32,

    /// Winning player (either player when `draw` is set)
    pub winner: PlayerId,

    /// Losing player
    pub loser: PlayerId,

    /// Whether the match ended in a draw
    #[serde(default)]
    pub draw: bool,

    /// When this result was recorded
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a new MatchRecord with auto-generated ID.
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        winner: PlayerId,
        loser: PlayerId,
        draw: bool,
    ) -> Self {
        let id = EntityId::generate(&[
            tournament_id.as_str(),
            &round.to_string(),
            winner.as_str(),
            loser.as_str(),
        ]);

        Self {
            id,
            tournament_id,
            round,
            winner,
            loser,
            draw,
            recorded_at: Utc::now(),
        }
    }

    /// A bye: the player is recorded against themself.
    pub fn bye(tournament_id: TournamentId, round: u32, player: PlayerId) -> Self {
        Self::new(tournament_id, round, player.clone(), player, false)
    }

    pub fn is_bye(&self) -> bool {
        self.winner == self.loser
    }

    /// True if this record is a match between `a` and `b`, in either order.
    pub fn is_between(&self, a: &PlayerId, b: &PlayerId) -> bool {
        (self.winner == *a && self.loser == *b) || (self.winner == *b && self.loser == *a)
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        self.winner == *player || self.loser == *player
    }

    /// The other side of the match, if `player` took part.
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        if self.winner == *player {
            Some(&self.loser)
        } else if self.loser == *player {
            Some(&self.winner)
        } else {
            None
        }
    }

    /// True if `player` is credited with a win by this record.
    pub fn is_win_for(&self, player: &PlayerId) -> bool {
        !self.draw && !self.is_bye() && self.winner == *player
    }
}
