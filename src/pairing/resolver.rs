//! Rematch resolution.
//!
//! Repeated pairings are broken up by shuffling the second-slot players in a
//! window around each conflict. The window grows by one position per side on
//! every pass. Once it is wider than the whole round, every player is
//! shuffled and re-split instead.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::window::window_range;
use super::PairingError;
use crate::models::{Pairing, Player, TournamentId};
use crate::provider::TournamentProvider;

/// Working pairings for one round, with a rematch flag per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pairings: Vec<Pairing>,
    conflicts: Vec<bool>,
}

impl RoundState {
    pub fn new(pairings: Vec<Pairing>) -> Self {
        let conflicts = vec![false; pairings.len()];
        Self {
            pairings,
            conflicts,
        }
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    pub fn into_pairings(self) -> Vec<Pairing> {
        self.pairings
    }

    /// Positions flagged by the last conflict scan.
    pub fn conflict_positions(&self) -> Vec<usize> {
        self.conflicts
            .iter()
            .enumerate()
            .filter(|(_, flagged)| **flagged)
            .map(|(i, _)| i)
            .collect()
    }

    fn mark_conflicts<P: TournamentProvider + ?Sized>(
        &mut self,
        provider: &P,
        tournament: &TournamentId,
    ) -> Result<usize, PairingError> {
        let mut count = 0;
        for (pairing, flag) in self.pairings.iter().zip(self.conflicts.iter_mut()) {
            *flag =
                provider.has_played_before(tournament, &pairing.player1.id, &pairing.player2.id)?;
            if *flag {
                count += 1;
            }
        }
        Ok(count)
    }

    fn split(&self) -> (Vec<Player>, Vec<Player>) {
        self.pairings
            .iter()
            .map(|p| (p.player1.clone(), p.player2.clone()))
            .unzip()
    }

    fn rebuild(&mut self, firsts: Vec<Player>, seconds: Vec<Player>) {
        self.pairings = firsts
            .into_iter()
            .zip(seconds)
            .map(|(a, b)| Pairing::new(a, b))
            .collect();
    }
}

/// Removes rematches from a round by randomized reshuffling.
pub struct RematchResolver<'a, P: ?Sized> {
    provider: &'a P,
    tournament: &'a TournamentId,
    max_attempts: usize,
}

impl<'a, P: TournamentProvider + ?Sized> RematchResolver<'a, P> {
    pub fn new(provider: &'a P, tournament: &'a TournamentId, max_attempts: usize) -> Self {
        Self {
            provider,
            tournament,
            max_attempts,
        }
    }

    /// Reshuffle until no pairing repeats a recorded match.
    ///
    /// A state without rematches comes back unchanged. Fails with
    /// `NonConvergence` when conflicts remain after `max_attempts` passes.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        mut state: RoundState,
        rng: &mut R,
    ) -> Result<RoundState, PairingError> {
        let n = state.len();
        let mut range_factor = 1usize;
        let mut attempts = 0usize;

        loop {
            let conflicts = state.mark_conflicts(self.provider, self.tournament)?;
            if conflicts == 0 {
                if attempts > 0 {
                    info!("Resolved rematches after {} reshuffle passes", attempts);
                }
                return Ok(state);
            }
            if attempts >= self.max_attempts {
                return Err(PairingError::NonConvergence {
                    attempts,
                    conflicts,
                });
            }

            let (mut firsts, mut seconds) = state.split();

            for center in state.conflict_positions() {
                let window = window_range(center, range_factor * 2, n);
                debug!(
                    "Rematch at position {}, shuffling opponents in {:?}",
                    center, window
                );
                seconds[window].shuffle(rng);
            }

            if range_factor > n {
                if range_factor == n + 1 {
                    warn!(
                        "Local reshuffling did not converge with {} pairings, shuffling all players",
                        n
                    );
                }
                let mut everyone = firsts;
                everyone.append(&mut seconds);
                everyone.shuffle(rng);
                seconds = everyone.split_off(n);
                firsts = everyone;
            }

            state.rebuild(firsts, seconds);
            range_factor += 1;
            attempts += 1;
        }
    }
}
