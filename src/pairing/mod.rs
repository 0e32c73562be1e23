//! Next-round pairing for Swiss-system tournaments.
//!
//! `SwissPairer::generate_pairings` runs the whole pipeline:
//! 1. Check that the previous round has every result recorded
//! 2. Give the bye to the lowest-ranked player without one (odd counts)
//! 3. Pair adjacent ranks
//! 4. Reshuffle until no pairing is a rematch
//!
//! The bye, if any, is the first entry of the returned list.

pub mod base;
pub mod bye;
pub mod resolver;
pub mod window;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::{current_round, is_round_complete, matches_per_round};
use crate::models::{Pairing, StandingsEntry, TournamentId};
use crate::provider::{ProviderError, TournamentProvider};

use self::base::base_round;
use self::bye::assign_bye;
use self::resolver::{RematchResolver, RoundState};

/// Errors that can occur while generating pairings.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error(
        "Round {round} is incomplete: {recorded} of {expected} results recorded. Finish entering the round first"
    )]
    IncompleteRound {
        round: u32,
        recorded: usize,
        expected: usize,
    },

    #[error("All {players} players have already received a bye")]
    ByeExhausted { players: usize },

    #[error("Inconsistent tournament data: {0}")]
    Inconsistent(String),

    #[error("Could not produce a rematch-free pairing after {attempts} attempts ({conflicts} rematches left)")]
    NonConvergence { attempts: usize, conflicts: usize },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Tuning for the rematch resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingOptions {
    /// Reshuffle passes before giving up
    pub max_attempts: usize,
}

pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Generates next-round pairings with an owned random source.
pub struct SwissPairer<R> {
    rng: R,
    options: PairingOptions,
}

impl SwissPairer<StdRng> {
    /// Reproducible pairings: the same seed and history give the same round.
    pub fn from_seed(seed: u64, options: PairingOptions) -> Self {
        Self::new(StdRng::seed_from_u64(seed), options)
    }

    pub fn from_entropy(options: PairingOptions) -> Self {
        Self::new(StdRng::from_os_rng(), options)
    }
}

impl<R: Rng> SwissPairer<R> {
    pub fn new(rng: R, options: PairingOptions) -> Self {
        Self { rng, options }
    }

    pub fn generate_pairings<P: TournamentProvider + ?Sized>(
        &mut self,
        provider: &P,
        tournament: &TournamentId,
    ) -> Result<Vec<Pairing>, PairingError> {
        generate_pairings(provider, tournament, &mut self.rng, &self.options)
    }
}

/// Pair every player of `tournament` for the next round.
pub fn generate_pairings<P, R>(
    provider: &P,
    tournament: &TournamentId,
    rng: &mut R,
    options: &PairingOptions,
) -> Result<Vec<Pairing>, PairingError>
where
    P: TournamentProvider + ?Sized,
    R: Rng + ?Sized,
{
    let player_count = provider.player_count(tournament)?;
    let match_count = provider.match_count(tournament)?;

    if player_count == 0 {
        debug!("No players registered in {}", tournament);
        return Ok(Vec::new());
    }
    if !is_round_complete(match_count, player_count) {
        let expected = matches_per_round(player_count);
        return Err(PairingError::IncompleteRound {
            round: current_round(match_count, player_count),
            recorded: match_count % expected,
            expected,
        });
    }

    let round = current_round(match_count, player_count);
    let standings = provider.standings(tournament)?;
    if standings.len() != player_count {
        return Err(PairingError::Inconsistent(format!(
            "standings list {} players but {} are registered",
            standings.len(),
            player_count
        )));
    }

    let (bye, state) = if player_count % 2 == 0 {
        let pairings = provider.base_adjacent_pairings(tournament)?;
        check_covers_standings(&pairings, &standings)?;
        (None, RoundState::new(pairings))
    } else {
        let assignment = assign_bye(provider, tournament, standings)?;
        (assignment.bye, base_round(&assignment.pool)?)
    };

    let resolved = RematchResolver::new(provider, tournament, options.max_attempts)
        .resolve(state, rng)?;

    let mut pairings = Vec::with_capacity(resolved.len() + 1);
    if let Some(player) = bye {
        pairings.push(Pairing::bye(player));
    }
    pairings.extend(resolved.into_pairings());

    info!(
        "Generated {} pairings for round {} of {}",
        pairings.len(),
        round,
        tournament
    );
    Ok(pairings)
}

/// Every standings player must appear exactly once in the base pairings.
fn check_covers_standings(
    pairings: &[Pairing],
    standings: &[StandingsEntry],
) -> Result<(), PairingError> {
    let mut seen = HashSet::new();
    for pairing in pairings {
        if pairing.is_bye() {
            return Err(PairingError::Inconsistent(format!(
                "base pairings contain a bye for {}",
                pairing.player1
            )));
        }
        for player in [&pairing.player1, &pairing.player2] {
            if !seen.insert(&player.id) {
                return Err(PairingError::Inconsistent(format!(
                    "{} appears twice in the base pairings",
                    player
                )));
            }
        }
    }

    let all_present = standings
        .iter()
        .all(|e| pairings.iter().any(|p| p.contains(&e.player.id)));
    if seen.len() != standings.len() || !all_present {
        return Err(PairingError::Inconsistent(format!(
            "base pairings cover {} players, standings list {}",
            seen.len(),
            standings.len()
        )));
    }
    Ok(())
}
