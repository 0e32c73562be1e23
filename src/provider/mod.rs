//! Standings and match-history collaborators.
//!
//! The pairing engine never computes rankings or touches storage itself. It
//! asks a `TournamentProvider` for already-sorted standings and for answers
//! about who has met whom. `memory::MemoryLedger` is the bundled
//! implementation; `storage::TournamentStore` loads one from disk.

pub mod memory;

use thiserror::Error;

use crate::models::{Pairing, PlayerId, StandingsEntry, TournamentId};
use crate::pairing::base::pair_adjacent;

pub use memory::MemoryLedger;

/// Errors a provider can report.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown tournament: {0}")]
    UnknownTournament(TournamentId),

    #[error("Player {player} is not registered in tournament {tournament}")]
    UnknownPlayer {
        tournament: TournamentId,
        player: PlayerId,
    },

    #[error("Invalid match result: {0}")]
    InvalidResult(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view of a tournament's standings and history.
pub trait TournamentProvider {
    /// Standings sorted best first by wins, then opponent strength.
    /// The order must be total and stable.
    fn standings(&self, tournament: &TournamentId) -> Result<Vec<StandingsEntry>, ProviderError>;

    fn player_count(&self, tournament: &TournamentId) -> Result<usize, ProviderError>;

    /// Recorded match results, byes included.
    fn match_count(&self, tournament: &TournamentId) -> Result<usize, ProviderError>;

    /// True if `a` and `b` have met in this tournament, in either role.
    fn has_played_before(
        &self,
        tournament: &TournamentId,
        a: &PlayerId,
        b: &PlayerId,
    ) -> Result<bool, ProviderError>;

    fn has_received_bye(
        &self,
        tournament: &TournamentId,
        player: &PlayerId,
    ) -> Result<bool, ProviderError>;

    /// Ranks 1-2, 3-4, ... of the full standings.
    ///
    /// Only consulted when the player count is even.
    fn base_adjacent_pairings(
        &self,
        tournament: &TournamentId,
    ) -> Result<Vec<Pairing>, ProviderError> {
        let players: Vec<_> = self
            .standings(tournament)?
            .into_iter()
            .map(|entry| entry.player)
            .collect();
        Ok(pair_adjacent(&players))
    }
}
