//! Bye assignment for odd player counts.

use tracing::debug;

use super::PairingError;
use crate::models::{Player, StandingsEntry, TournamentId};
use crate::provider::TournamentProvider;

/// The bye recipient (if any) and the players left to pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByeAssignment {
    pub bye: Option<Player>,
    pub pool: Vec<Player>,
}

/// Pick the lowest-ranked player who has not had a bye yet.
///
/// With an even number of players nobody sits out and the whole standings
/// list becomes the pool. Nothing is recorded; persisting the bye is up to
/// the caller once the round is final.
pub fn assign_bye<P: TournamentProvider + ?Sized>(
    provider: &P,
    tournament: &TournamentId,
    standings: Vec<StandingsEntry>,
) -> Result<ByeAssignment, PairingError> {
    let mut pool: Vec<Player> = standings.into_iter().map(|entry| entry.player).collect();

    if pool.len() % 2 == 0 {
        return Ok(ByeAssignment { bye: None, pool });
    }

    for index in (0..pool.len()).rev() {
        if provider.has_received_bye(tournament, &pool[index].id)? {
            debug!("{} already had a bye, moving up", pool[index]);
            continue;
        }
        let bye = pool.remove(index);
        debug!("Bye goes to {} (rank {})", bye, index + 1);
        return Ok(ByeAssignment {
            bye: Some(bye),
            pool,
        });
    }

    Err(PairingError::ByeExhausted {
        players: pool.len(),
    })
}
