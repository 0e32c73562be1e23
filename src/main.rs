use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_pairing::config::AppConfig;
use swiss_pairing::storage::{StorageConfig, TournamentStore};
use swiss_pairing::{SwissPairer, TournamentId, TournamentProvider};

#[derive(Parser)]
#[command(name = "swiss-pairing")]
#[command(about = "Swiss-system tournament pairings with rematch avoidance")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new tournament
    CreateTournament {
        /// Tournament name
        name: String,
    },

    /// List known tournaments
    ListTournaments,

    /// Register one or more players in a tournament
    RegisterPlayer {
        #[arg(long)]
        tournament: String,

        /// Player names (need not be unique)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Withdraw a player who has not played yet
    RemovePlayer {
        #[arg(long)]
        tournament: String,

        #[arg(long)]
        player: String,
    },

    /// Delete every registration of a tournament
    DeletePlayers {
        #[arg(long)]
        tournament: String,
    },

    /// Delete a tournament with its players and results
    DeleteTournament {
        #[arg(long)]
        tournament: String,
    },

    /// Record a match result
    ReportMatch {
        #[arg(long)]
        tournament: String,

        #[arg(long)]
        winner: String,

        #[arg(long)]
        loser: String,

        /// The match was drawn
        #[arg(long)]
        draw: bool,
    },

    /// Show current standings
    Standings {
        #[arg(long)]
        tournament: String,
    },

    /// Generate pairings for the next round
    Pair {
        #[arg(long)]
        tournament: String,

        /// Seed for reproducible pairings
        #[arg(long)]
        seed: Option<u64>,

        /// Reshuffle passes before giving up (0 only checks for rematches)
        #[arg(long)]
        max_attempts: Option<usize>,

        /// Print pairings as JSON
        #[arg(long)]
        json: bool,

        /// Record the assigned bye right away
        #[arg(long)]
        commit_bye: bool,
    },

    /// Delete every recorded result of a tournament
    ResetMatches {
        #[arg(long)]
        tournament: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if let Commands::Pair {
        seed, max_attempts, ..
    } = &cli.command
    {
        if let Some(max_attempts) = max_attempts {
            config.pairing.max_attempts = *max_attempts;
        }
        if seed.is_some() {
            config.pairing.seed = *seed;
        }
    }
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::debug!("Starting swiss-pairing v{}", env!("CARGO_PKG_VERSION"));

    let store = TournamentStore::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::CreateTournament { name } => {
            let tournament = store.create_tournament(&name)?;
            println!("{}", tournament.id);
        }
        Commands::ListTournaments => {
            let tournaments = store.list_tournaments()?;
            if tournaments.is_empty() {
                println!("No tournaments yet. Use `create-tournament` to add one.");
            }
            for t in tournaments {
                println!("{}  {}  (created {})", t.id, t.name, t.created_at.date_naive());
            }
        }
        Commands::RegisterPlayer { tournament, names } => {
            for player in store.register_players(&TournamentId::from(tournament), &names)? {
                println!("{}  {}", player.id, player.name);
            }
        }
        Commands::RemovePlayer { tournament, player } => {
            let removed = store.remove_player(&TournamentId::from(tournament), &player.into())?;
            println!("Removed {}", removed);
        }
        Commands::DeletePlayers { tournament } => {
            let removed = store.delete_players(&TournamentId::from(tournament))?;
            println!("Deleted {} players", removed);
        }
        Commands::DeleteTournament { tournament } => {
            let removed = store.delete_tournament(&TournamentId::from(tournament))?;
            println!("Deleted tournament {}", removed.name);
        }
        Commands::ReportMatch {
            tournament,
            winner,
            loser,
            draw,
        } => {
            let record = store.record_match(
                &TournamentId::from(tournament),
                &winner.into(),
                &loser.into(),
                draw,
            )?;
            println!("Recorded round {} match {}", record.round, record.id);
        }
        Commands::Standings { tournament } => {
            let id = TournamentId::from(tournament);
            let ledger = store.load(&id)?;
            let standings = ledger.standings(&id)?;

            println!(
                "{:>4}  {:<24} {:>5} {:>7} {:>7} {:>8}",
                "Rank", "Player", "Wins", "L/D", "Played", "Opp wins"
            );
            for (rank, entry) in standings.iter().enumerate() {
                println!(
                    "{:>4}  {:<24} {:>5} {:>7} {:>7} {:>8}",
                    rank + 1,
                    entry.player.name,
                    entry.wins,
                    entry.losses_or_draws(),
                    entry.matches,
                    entry.opponent_wins
                );
            }
        }
        Commands::Pair {
            tournament,
            json,
            commit_bye,
            ..
        } => {
            let id = TournamentId::from(tournament);
            let ledger = store.load(&id)?;

            let options = config.pairing.options();
            let pairings = match config.pairing.seed {
                Some(seed) => {
                    SwissPairer::from_seed(seed, options).generate_pairings(&ledger, &id)
                }
                None => SwissPairer::from_entropy(options).generate_pairings(&ledger, &id),
            }?;

            if json {
                println!("{}", serde_json::to_string_pretty(&pairings)?);
            } else {
                for (table, pairing) in pairings.iter().enumerate() {
                    println!("{:>3}. {}", table + 1, pairing);
                }
            }

            if commit_bye {
                if let Some(bye) = pairings.iter().find(|p| p.is_bye()) {
                    store.record_bye(&id, &bye.player1.id)?;
                    tracing::info!("Committed bye for {}", bye.player1);
                }
            }
        }
        Commands::ResetMatches { tournament } => {
            let removed = store.delete_matches(&TournamentId::from(tournament))?;
            println!("Deleted {} results", removed);
        }
    }

    Ok(())
}
