//! Pairing model — one matchup in the round being generated.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Player, PlayerId};

/// Two players matched for the next round.
///
/// A player paired with themself has the bye.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player1: Player,
    pub player2: Player,
}

impl Pairing {
    pub fn new(player1: Player, player2: Player) -> Self {
        Self { player1, player2 }
    }

    /// A bye for `player`.
    pub fn bye(player: Player) -> Self {
        Self {
            player1: player.clone(),
            player2: player,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player1.id == self.player2.id
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.player1.id == *player || self.player2.id == *player
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bye() {
            write!(f, "{} (bye)", self.player1.name)
        } else {
            write!(f, "{} vs {}", self.player1.name, self.player2.name)
        }
    }
}
