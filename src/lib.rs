//! # Swiss Pairing
//!
//! Next-round pairings for Swiss-system tournaments.
//!
//! ## Architecture
//!
//! - **pairing**: Bye assignment, adjacency pairing and rematch resolution
//! - **provider**: The standings/history contract the pairing engine consumes
//! - **models**: Core data structures (players, match records, pairings)
//! - **calculate**: Standings and round bookkeeping for the bundled providers
//! - **storage**: Filesystem tournament store (JSONL)
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod pairing;
pub mod provider;
pub mod storage;

pub use models::*;
pub use pairing::{generate_pairings, PairingError, PairingOptions, SwissPairer};
pub use provider::{MemoryLedger, ProviderError, TournamentProvider};
