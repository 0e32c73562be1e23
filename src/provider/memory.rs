//! In-memory tournament ledger.

use std::collections::HashMap;

use tracing::debug;

use super::{ProviderError, TournamentProvider};
use crate::calculate::{compute_standings, current_round};
use crate::models::{MatchRecord, Player, PlayerId, StandingsEntry, Tournament, TournamentId};

#[derive(Debug, Clone)]
struct TournamentEntry {
    tournament: Tournament,
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
}

/// Players and results for any number of tournaments.
///
/// Standings are recomputed from the recorded results on every query.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    tournaments: HashMap<TournamentId, TournamentEntry>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_tournament(&mut self, name: impl Into<String>) -> TournamentId {
        let tournament = Tournament::new(name);
        let id = tournament.id.clone();
        self.insert_tournament(tournament);
        id
    }

    /// Add an existing tournament. A tournament with the same id is replaced.
    pub fn insert_tournament(&mut self, tournament: Tournament) {
        self.tournaments.insert(
            tournament.id.clone(),
            TournamentEntry {
                tournament,
                players: Vec::new(),
                matches: Vec::new(),
            },
        );
    }

    pub fn tournament(&self, id: &TournamentId) -> Option<&Tournament> {
        self.tournaments.get(id).map(|e| &e.tournament)
    }

    /// Registered players in registration order.
    pub fn players(&self, id: &TournamentId) -> Result<&[Player], ProviderError> {
        Ok(&self.entry(id)?.players)
    }

    /// Recorded results in the order they were reported.
    pub fn matches(&self, id: &TournamentId) -> Result<&[MatchRecord], ProviderError> {
        Ok(&self.entry(id)?.matches)
    }

    pub fn register_player(
        &mut self,
        tournament: &TournamentId,
        name: impl Into<String>,
    ) -> Result<Player, ProviderError> {
        let player = Player::new(name);
        self.add_player(tournament, player.clone())?;
        Ok(player)
    }

    /// Register a player with a known id. Registering the same id twice is a no-op.
    pub fn add_player(
        &mut self,
        tournament: &TournamentId,
        player: Player,
    ) -> Result<(), ProviderError> {
        let entry = self.entry_mut(tournament)?;
        if !entry.players.iter().any(|p| p.id == player.id) {
            debug!("Registered {} in {}", player, tournament);
            entry.players.push(player);
        }
        Ok(())
    }

    /// Record a match result in the current round.
    pub fn record_match(
        &mut self,
        tournament: &TournamentId,
        winner: &PlayerId,
        loser: &PlayerId,
        draw: bool,
    ) -> Result<MatchRecord, ProviderError> {
        if winner == loser {
            return Err(ProviderError::InvalidResult(format!(
                "{} cannot play against themself; record a bye instead",
                winner
            )));
        }
        self.ensure_registered(tournament, winner)?;
        self.ensure_registered(tournament, loser)?;

        let record = MatchRecord::new(
            tournament.clone(),
            self.next_round(tournament)?,
            winner.clone(),
            loser.clone(),
            draw,
        );
        self.insert_match(record.clone())?;
        Ok(record)
    }

    /// Record a bye for `player` in the current round.
    pub fn record_bye(
        &mut self,
        tournament: &TournamentId,
        player: &PlayerId,
    ) -> Result<MatchRecord, ProviderError> {
        self.ensure_registered(tournament, player)?;
        if self.has_received_bye(tournament, player)? {
            return Err(ProviderError::InvalidResult(format!(
                "{} has already received a bye",
                player
            )));
        }

        let record = MatchRecord::bye(
            tournament.clone(),
            self.next_round(tournament)?,
            player.clone(),
        );
        self.insert_match(record.clone())?;
        Ok(record)
    }

    /// Append an already-built record, e.g. one loaded from disk.
    pub fn insert_match(&mut self, record: MatchRecord) -> Result<(), ProviderError> {
        let entry = self.entry_mut(&record.tournament_id)?;
        if entry.matches.iter().any(|m| m.id == record.id) {
            return Err(ProviderError::InvalidResult(format!(
                "match {} is already recorded",
                record.id
            )));
        }
        entry.matches.push(record);
        Ok(())
    }

    /// Drop every recorded result, keeping registrations.
    pub fn clear_matches(&mut self, tournament: &TournamentId) -> Result<usize, ProviderError> {
        let entry = self.entry_mut(tournament)?;
        let removed = entry.matches.len();
        entry.matches.clear();
        Ok(removed)
    }

    /// Withdraw a player who has no recorded results yet.
    pub fn remove_player(
        &mut self,
        tournament: &TournamentId,
        player: &PlayerId,
    ) -> Result<Player, ProviderError> {
        self.ensure_registered(tournament, player)?;
        let entry = self.entry_mut(tournament)?;
        if entry.matches.iter().any(|m| m.involves(player)) {
            return Err(ProviderError::InvalidResult(format!(
                "{} has recorded results; delete the matches first",
                player
            )));
        }

        let position = entry
            .players
            .iter()
            .position(|p| p.id == *player)
            .ok_or_else(|| ProviderError::UnknownPlayer {
                tournament: tournament.clone(),
                player: player.clone(),
            })?;
        let removed = entry.players.remove(position);
        debug!("Removed {} from {}", removed, tournament);
        Ok(removed)
    }

    /// Drop every registration. Results must be cleared first.
    pub fn clear_players(&mut self, tournament: &TournamentId) -> Result<usize, ProviderError> {
        let entry = self.entry_mut(tournament)?;
        if !entry.matches.is_empty() {
            return Err(ProviderError::InvalidResult(format!(
                "{} results are still recorded; delete the matches first",
                entry.matches.len()
            )));
        }
        let removed = entry.players.len();
        entry.players.clear();
        Ok(removed)
    }

    fn next_round(&self, tournament: &TournamentId) -> Result<u32, ProviderError> {
        let entry = self.entry(tournament)?;
        Ok(current_round(entry.matches.len(), entry.players.len()))
    }

    fn ensure_registered(
        &self,
        tournament: &TournamentId,
        player: &PlayerId,
    ) -> Result<(), ProviderError> {
        if self.entry(tournament)?.players.iter().any(|p| p.id == *player) {
            Ok(())
        } else {
            Err(ProviderError::UnknownPlayer {
                tournament: tournament.clone(),
                player: player.clone(),
            })
        }
    }

    fn entry(&self, id: &TournamentId) -> Result<&TournamentEntry, ProviderError> {
        self.tournaments
            .get(id)
            .ok_or_else(|| ProviderError::UnknownTournament(id.clone()))
    }

    fn entry_mut(&mut self, id: &TournamentId) -> Result<&mut TournamentEntry, ProviderError> {
        self.tournaments
            .get_mut(id)
            .ok_or_else(|| ProviderError::UnknownTournament(id.clone()))
    }
}

impl TournamentProvider for MemoryLedger {
    fn standings(&self, tournament: &TournamentId) -> Result<Vec<StandingsEntry>, ProviderError> {
        let entry = self.entry(tournament)?;
        Ok(compute_standings(&entry.players, &entry.matches))
    }

    fn player_count(&self, tournament: &TournamentId) -> Result<usize, ProviderError> {
        Ok(self.entry(tournament)?.players.len())
    }

    fn match_count(&self, tournament: &TournamentId) -> Result<usize, ProviderError> {
        Ok(self.entry(tournament)?.matches.len())
    }

    fn has_played_before(
        &self,
        tournament: &TournamentId,
        a: &PlayerId,
        b: &PlayerId,
    ) -> Result<bool, ProviderError> {
        Ok(self
            .entry(tournament)?
            .matches
            .iter()
            .any(|m| !m.is_bye() && m.is_between(a, b)))
    }

    fn has_received_bye(
        &self,
        tournament: &TournamentId,
        player: &PlayerId,
    ) -> Result<bool, ProviderError> {
        Ok(self
            .entry(tournament)?
            .matches
            .iter()
            .any(|m| m.is_bye() && m.winner == *player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_players(n: usize) -> (MemoryLedger, TournamentId, Vec<Player>) {
        let mut ledger = MemoryLedger::new();
        let tid = ledger.create_tournament("Test Open");
        let players = (1..=n)
            .map(|i| {
                let p = Player::with_id(format!("p{}", i), format!("Player {}", i));
                ledger.add_player(&tid, p.clone()).unwrap();
                p
            })
            .collect();
        (ledger, tid, players)
    }

    #[test]
    fn test_unknown_tournament() {
        let ledger = MemoryLedger::new();
        let err = ledger.player_count(&"missing".into()).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownTournament(_)));
    }

    #[test]
    fn test_register_player() {
        let mut ledger = MemoryLedger::new();
        let tid = ledger.create_tournament("Test Open");

        let alice = ledger.register_player(&tid, "Alice").unwrap();
        ledger.add_player(&tid, alice.clone()).unwrap();

        assert_eq!(ledger.player_count(&tid).unwrap(), 1);
        assert_eq!(ledger.players(&tid).unwrap()[0], alice);
        assert_eq!(ledger.tournament(&tid).unwrap().name, "Test Open");
    }

    #[test]
    fn test_record_match_stamps_round() {
        let (mut ledger, tid, p) = ledger_with_players(4);

        let m1 = ledger.record_match(&tid, &p[0].id, &p[1].id, false).unwrap();
        let m2 = ledger.record_match(&tid, &p[2].id, &p[3].id, false).unwrap();
        let m3 = ledger.record_match(&tid, &p[0].id, &p[2].id, false).unwrap();

        assert_eq!((m1.round, m2.round, m3.round), (1, 1, 2));
        assert_eq!(ledger.match_count(&tid).unwrap(), 3);
    }

    #[test]
    fn test_record_match_rejects_unregistered_player() {
        let (mut ledger, tid, p) = ledger_with_players(2);
        let err = ledger
            .record_match(&tid, &p[0].id, &"stranger".into(), false)
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownPlayer { .. }));
    }

    #[test]
    fn test_record_match_rejects_self_match() {
        let (mut ledger, tid, p) = ledger_with_players(2);
        let err = ledger
            .record_match(&tid, &p[0].id, &p[0].id, false)
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResult(_)));
    }

    #[test]
    fn test_has_played_before_either_order() {
        let (mut ledger, tid, p) = ledger_with_players(4);
        ledger.record_match(&tid, &p[0].id, &p[1].id, false).unwrap();

        assert!(ledger.has_played_before(&tid, &p[0].id, &p[1].id).unwrap());
        assert!(ledger.has_played_before(&tid, &p[1].id, &p[0].id).unwrap());
        assert!(!ledger.has_played_before(&tid, &p[0].id, &p[2].id).unwrap());
    }

    #[test]
    fn test_bye_recorded_once() {
        let (mut ledger, tid, p) = ledger_with_players(3);

        let bye = ledger.record_bye(&tid, &p[2].id).unwrap();
        assert!(bye.is_bye());
        assert!(ledger.has_received_bye(&tid, &p[2].id).unwrap());
        assert!(!ledger.has_received_bye(&tid, &p[0].id).unwrap());
        // A bye is not a meeting with anyone, including oneself.
        assert!(!ledger.has_played_before(&tid, &p[2].id, &p[2].id).unwrap());

        let err = ledger.record_bye(&tid, &p[2].id).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResult(_)));
    }

    #[test]
    fn test_insert_duplicate_match_rejected() {
        let (mut ledger, tid, p) = ledger_with_players(2);
        let record = MatchRecord::new(tid.clone(), 1, p[0].id.clone(), p[1].id.clone(), false);

        ledger.insert_match(record.clone()).unwrap();
        assert!(ledger.insert_match(record).is_err());
    }

    #[test]
    fn test_standings_from_results() {
        let (mut ledger, tid, p) = ledger_with_players(4);
        ledger.record_match(&tid, &p[3].id, &p[0].id, false).unwrap();
        ledger.record_match(&tid, &p[2].id, &p[1].id, false).unwrap();

        let standings = ledger.standings(&tid).unwrap();
        let ids: Vec<&str> = standings.iter().map(|e| e.player.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p4", "p1", "p2"]);
    }

    #[test]
    fn test_default_base_pairings_follow_standings() {
        let (mut ledger, tid, p) = ledger_with_players(4);
        ledger.record_match(&tid, &p[3].id, &p[0].id, false).unwrap();
        ledger.record_match(&tid, &p[2].id, &p[1].id, false).unwrap();

        let pairings = ledger.base_adjacent_pairings(&tid).unwrap();
        assert_eq!(pairings.len(), 2);
        assert_eq!(pairings[0].player1.id.as_str(), "p3");
        assert_eq!(pairings[0].player2.id.as_str(), "p4");
        assert_eq!(pairings[1].player1.id.as_str(), "p1");
        assert_eq!(pairings[1].player2.id.as_str(), "p2");
    }

    #[test]
    fn test_remove_player_without_results() {
        let (mut ledger, tid, p) = ledger_with_players(3);

        let removed = ledger.remove_player(&tid, &p[1].id).unwrap();
        assert_eq!(removed, p[1]);
        assert_eq!(ledger.players(&tid).unwrap(), &[p[0].clone(), p[2].clone()]);

        let err = ledger.remove_player(&tid, &p[1].id).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownPlayer { .. }));
    }

    #[test]
    fn test_remove_player_with_results_rejected() {
        let (mut ledger, tid, p) = ledger_with_players(3);
        ledger.record_bye(&tid, &p[2].id).unwrap();

        let err = ledger.remove_player(&tid, &p[2].id).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResult(_)));
        assert_eq!(ledger.player_count(&tid).unwrap(), 3);
    }

    #[test]
    fn test_clear_players_requires_no_results() {
        let (mut ledger, tid, p) = ledger_with_players(2);
        ledger.record_match(&tid, &p[0].id, &p[1].id, false).unwrap();

        assert!(ledger.clear_players(&tid).is_err());
        ledger.clear_matches(&tid).unwrap();
        assert_eq!(ledger.clear_players(&tid).unwrap(), 2);
        assert_eq!(ledger.player_count(&tid).unwrap(), 0);
    }

    #[test]
    fn test_clear_matches() {
        let (mut ledger, tid, p) = ledger_with_players(2);
        ledger.record_match(&tid, &p[0].id, &p[1].id, false).unwrap();

        assert_eq!(ledger.clear_matches(&tid).unwrap(), 1);
        assert_eq!(ledger.match_count(&tid).unwrap(), 0);
        assert_eq!(ledger.player_count(&tid).unwrap(), 2);
    }
}
