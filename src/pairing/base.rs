//! Base adjacency pairing.

use super::resolver::RoundState;
use super::PairingError;
use crate::models::{Pairing, Player};

/// Pair ranks 1-2, 3-4, ... of an already sorted list.
///
/// A trailing odd player is left out; use `base_round` to reject odd pools.
pub fn pair_adjacent(players: &[Player]) -> Vec<Pairing> {
    players
        .chunks_exact(2)
        .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Seed a round from a bye-reduced pool.
pub fn base_round(pool: &[Player]) -> Result<RoundState, PairingError> {
    if pool.len() % 2 != 0 {
        return Err(PairingError::Inconsistent(format!(
            "{} players left to pair after bye assignment",
            pool.len()
        )));
    }
    Ok(RoundState::new(pair_adjacent(pool)))
}
