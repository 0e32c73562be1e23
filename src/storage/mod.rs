//! Filesystem storage for tournaments.
//!
//! Layout under the data directory:
//! - `tournaments.jsonl` with one line per tournament
//! - `tournaments/<id>/players.jsonl` in registration order
//! - `tournaments/<id>/matches.jsonl` in reporting order

mod jsonl;
mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::TournamentId;
use crate::provider::ProviderError;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error(transparent)]
    Ledger(#[from] ProviderError),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.data_dir.join(EntityType::Tournament.filename())
    }

    pub fn tournament_dir(&self, id: &TournamentId) -> PathBuf {
        self.data_dir.join("tournaments").join(id.as_str())
    }

    pub fn players_path(&self, id: &TournamentId) -> PathBuf {
        self.tournament_dir(id).join(EntityType::Player.filename())
    }

    pub fn matches_path(&self, id: &TournamentId) -> PathBuf {
        self.tournament_dir(id).join(EntityType::Match.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
