//! Standings and round bookkeeping.
//!
//! Computes the ranking the bundled collaborators hand to the pairing engine:
//! - Wins, matches played and opponent wins per player
//! - Round sizes and completeness from the recorded match count

use std::collections::HashMap;

use crate::models::{MatchRecord, Player, PlayerId, StandingsEntry};

/// Number of match records a complete round produces.
///
/// A bye is recorded as a match, so odd player counts round up.
pub fn matches_per_round(player_count: usize) -> usize {
    (player_count + 1) / 2
}

/// True if every round so far has all of its results recorded.
pub fn is_round_complete(match_count: usize, player_count: usize) -> bool {
    let per_round = matches_per_round(player_count);
    if per_round == 0 {
        return match_count == 0;
    }
    match_count % per_round == 0
}

/// The round the next recorded result belongs to (1-based).
pub fn current_round(match_count: usize, player_count: usize) -> u32 {
    let per_round = matches_per_round(player_count);
    if per_round == 0 {
        return 1;
    }
    (match_count / per_round) as u32 + 1
}

/// Rank players by wins, then by the wins of the opponents they faced.
///
/// Remaining ties keep registration order, so the result is total and stable.
pub fn compute_standings(players: &[Player], matches: &[MatchRecord]) -> Vec<StandingsEntry> {
    let mut wins: HashMap<&PlayerId, u32> = HashMap::new();
    let mut played: HashMap<&PlayerId, u32> = HashMap::new();

    for m in matches.iter().filter(|m| !m.is_bye()) {
        *played.entry(&m.winner).or_default() += 1;
        *played.entry(&m.loser).or_default() += 1;
        if m.is_win_for(&m.winner) {
            *wins.entry(&m.winner).or_default() += 1;
        }
    }

    let mut standings: Vec<StandingsEntry> = players
        .iter()
        .map(|player| {
            let opponent_wins = matches
                .iter()
                .filter(|m| !m.is_bye())
                .filter_map(|m| m.opponent_of(&player.id))
                .map(|opponent| wins.get(opponent).copied().unwrap_or(0))
                .sum();

            StandingsEntry::new(player.clone())
                .with_record(
                    wins.get(&player.id).copied().unwrap_or(0),
                    played.get(&player.id).copied().unwrap_or(0),
                )
                .with_opponent_wins(opponent_wins)
        })
        .collect();

    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.opponent_wins.cmp(&a.opponent_wins))
    });

    standings
}
