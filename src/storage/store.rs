//! JSONL-backed tournament store.

use std::fs;

use tracing::info;

use super::{JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{MatchRecord, Player, PlayerId, Tournament, TournamentId};
use crate::provider::MemoryLedger;

/// Tournaments, registrations and results on disk.
///
/// Every mutation loads the tournament into a `MemoryLedger` first so the
/// same validation applies as in memory, then appends the accepted record.
#[derive(Debug, Clone)]
pub struct TournamentStore {
    config: StorageConfig,
}

impl TournamentStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn create_tournament(&self, name: &str) -> Result<Tournament, StorageError> {
        let tournament = Tournament::new(name);
        JsonlWriter::new(self.config.tournaments_path()).append(&tournament)?;
        info!("Created tournament {} ({})", tournament.name, tournament.id);
        Ok(tournament)
    }

    pub fn list_tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        JsonlReader::new(self.config.tournaments_path()).read_all()
    }

    pub fn find_tournament(&self, id: &TournamentId) -> Result<Tournament, StorageError> {
        self.list_tournaments()?
            .into_iter()
            .find(|t| t.id == *id)
            .ok_or_else(|| StorageError::TournamentNotFound(id.clone()))
    }

    /// Load a tournament with its players and results.
    pub fn load(&self, id: &TournamentId) -> Result<MemoryLedger, StorageError> {
        let tournament = self.find_tournament(id)?;
        let players: Vec<Player> = JsonlReader::new(self.config.players_path(id)).read_all()?;
        let matches: Vec<MatchRecord> =
            JsonlReader::new(self.config.matches_path(id)).read_all()?;

        let mut ledger = MemoryLedger::new();
        ledger.insert_tournament(tournament);
        for player in players {
            ledger.add_player(id, player)?;
        }
        for record in matches {
            ledger.insert_match(record)?;
        }
        Ok(ledger)
    }

    /// Register players in the given order. Nothing is written if any fails.
    pub fn register_players<S: AsRef<str>>(
        &self,
        id: &TournamentId,
        names: &[S],
    ) -> Result<Vec<Player>, StorageError> {
        let mut ledger = self.load(id)?;
        let players = names
            .iter()
            .map(|name| ledger.register_player(id, name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        JsonlWriter::new(self.config.players_path(id)).append_batch(&players)?;
        info!("Registered {} players in {}", players.len(), id);
        Ok(players)
    }

    /// Withdraw a player who has not played yet.
    pub fn remove_player(
        &self,
        id: &TournamentId,
        player: &PlayerId,
    ) -> Result<Player, StorageError> {
        let mut ledger = self.load(id)?;
        let removed = ledger.remove_player(id, player)?;
        JsonlWriter::new(self.config.players_path(id)).write_all(ledger.players(id)?)?;
        info!("Removed {} from {}", removed, id);
        Ok(removed)
    }

    /// Remove every registration. Fails while results are recorded.
    pub fn delete_players(&self, id: &TournamentId) -> Result<usize, StorageError> {
        let mut ledger = self.load(id)?;
        let removed = ledger.clear_players(id)?;
        JsonlWriter::<Player>::new(self.config.players_path(id)).write_all(&[])?;
        info!("Deleted {} players from {}", removed, id);
        Ok(removed)
    }

    pub fn record_match(
        &self,
        id: &TournamentId,
        winner: &PlayerId,
        loser: &PlayerId,
        draw: bool,
    ) -> Result<MatchRecord, StorageError> {
        let mut ledger = self.load(id)?;
        let record = ledger.record_match(id, winner, loser, draw)?;
        JsonlWriter::new(self.config.matches_path(id)).append(&record)?;
        info!(
            "Recorded round {} result in {}: {} vs {}{}",
            record.round,
            id,
            winner,
            loser,
            if draw { " (draw)" } else { "" }
        );
        Ok(record)
    }

    pub fn record_bye(
        &self,
        id: &TournamentId,
        player: &PlayerId,
    ) -> Result<MatchRecord, StorageError> {
        let mut ledger = self.load(id)?;
        let record = ledger.record_bye(id, player)?;
        JsonlWriter::new(self.config.matches_path(id)).append(&record)?;
        info!("Recorded round {} bye for {} in {}", record.round, player, id);
        Ok(record)
    }

    /// Remove every recorded result of a tournament, keeping registrations.
    pub fn delete_matches(&self, id: &TournamentId) -> Result<usize, StorageError> {
        let mut ledger = self.load(id)?;
        let removed = ledger.clear_matches(id)?;
        JsonlWriter::new(self.config.matches_path(id)).write_all(ledger.matches(id)?)?;
        info!("Deleted {} results from {}", removed, id);
        Ok(removed)
    }

    /// Remove a tournament with its players and results.
    pub fn delete_tournament(&self, id: &TournamentId) -> Result<Tournament, StorageError> {
        let mut tournaments = self.list_tournaments()?;
        let position = tournaments
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| StorageError::TournamentNotFound(id.clone()))?;
        let removed = tournaments.remove(position);

        JsonlWriter::new(self.config.tournaments_path()).write_all(&tournaments)?;
        let dir = self.config.tournament_dir(id);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        info!("Deleted tournament {} ({})", removed.name, removed.id);
        Ok(removed)
    }
}
