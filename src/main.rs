use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tailgate_tracker::calculate::recent_contests;
use tailgate_tracker::client::{ApiClient, ScoreApi};
use tailgate_tracker::config::AppConfig;
use tailgate_tracker::models::{GameId, NewGame, NewPlayer, PlayerId, RoundId, TeamId};
use tailgate_tracker::parse_duration;
use tailgate_tracker::report;
use tailgate_tracker::sync::{DataSync, Mutation, Snapshot};
use tailgate_tracker::views::{
    dice_dashboard, golf_dashboard, golf_player_view, player_view, rivalry_page, round_view,
    tallied_rivalry_page, team_detail_view, teams_view, DashboardState, Sport,
};

#[derive(Parser)]
#[command(name = "tailgate")]
#[command(about = "Leaderboards and stats for tailgate dice and golf")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./tailgate.toml")]
    config: String,

    /// Backend base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Deadline for the initial load, e.g. "10s" (overrides config)
    #[arg(long)]
    load_timeout: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print view models as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Leaderboard, top winner and the recent-window summary
    Dashboard {
        #[arg(long, default_value = "dice")]
        sport: Sport,

        /// Restrict to one calendar year
        #[arg(long)]
        season: Option<i32>,
    },

    /// Dice stats for one player
    Player { name: String },

    /// Golf stats for one player
    GolfPlayer { name: String },

    /// Hole-by-hole view of a golf round
    Round { id: RoundId },

    /// Orchard vs Dreher
    Rivalry {
        /// Recompute from game history with the configured factions
        #[arg(long)]
        tally: bool,
    },

    /// Team leaderboard
    Teams,

    /// Stats for one team
    Team { id: TeamId },

    /// Search golf courses
    Courses { query: String },

    /// Add a player
    AddPlayer { name: String },

    /// Record a dice game (player names, comma-separated)
    AddGame {
        #[arg(long, value_delimiter = ',')]
        team1: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        team2: Vec<String>,

        #[arg(long)]
        score1: u32,

        #[arg(long)]
        score2: u32,

        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a dice game
    DeleteGame { id: GameId },

    /// Delete a golf round
    DeleteRound { id: RoundId },
}

fn emit<T: Serialize>(json: bool, view: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render(view));
    }
    Ok(())
}

/// Second half of a mutation message. A failed reload does not undo the change.
fn reload_summary<T>(mutation: &Mutation<T>, what: &str, count: fn(&Snapshot) -> usize) -> String {
    match &mutation.reload {
        Ok(snapshot) => format!("{} {what} loaded.", count(snapshot)),
        Err(e) => format!("The change was saved, but reloading failed: {e}"),
    }
}

fn resolve_ids(snapshot: &Snapshot, names: &[String]) -> Result<Vec<PlayerId>> {
    names
        .iter()
        .map(|name| {
            snapshot
                .find_player(name)
                .map(|p| p.id)
                .ok_or_else(|| anyhow!("Unknown player: {}", name.trim()))
        })
        .collect()
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_or_default(Path::new(&cli.config))
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }
    if let Some(raw) = &cli.load_timeout {
        let timeout = parse_duration(raw)
            .ok_or_else(|| anyhow!("Invalid --load-timeout (expected e.g. 10s, 1m): {raw}"))?;
        config.api.load_timeout_seconds = timeout.as_secs();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting tailgate v{}", env!("CARGO_PKG_VERSION"));

    let api: Arc<dyn ScoreApi> = Arc::new(ApiClient::new(&config.api)?);
    let sync = DataSync::new(api.clone(), config.api.load_timeout());
    let stats = &config.stats;

    match cli.command {
        Commands::Dashboard { sport, season } => {
            let state = DashboardState::new(sport, season);
            let snapshot = sync.load().await?;
            let view = match sport {
                Sport::Dice => dice_dashboard(
                    &snapshot.players,
                    &snapshot.games,
                    state,
                    snapshot.loaded_at,
                    stats,
                ),
                Sport::Golf => {
                    let golf_stats = api.golf_stats().await?;
                    golf_dashboard(
                        &golf_stats,
                        &snapshot.golf_rounds,
                        state,
                        snapshot.loaded_at,
                        stats,
                    )
                }
            };
            emit(cli.json, &view, report::render_dashboard)?;
        }

        Commands::Player { name } => {
            let snapshot = sync.load().await?;
            let player = snapshot
                .find_player(&name)
                .ok_or_else(|| anyhow!("Unknown player: {name}"))?;
            let view = player_view(player, &snapshot.games, stats.recent_count);
            emit(cli.json, &view, report::render_player)?;
        }

        Commands::GolfPlayer { name } => {
            let snapshot = sync.load().await?;
            let player = snapshot
                .find_player(&name)
                .ok_or_else(|| anyhow!("Unknown player: {name}"))?;
            let golf = api.golf_player_stats(player.id).await?;

            let mut detailed = Vec::new();
            for summary in recent_contests(&golf.name, &snapshot.golf_rounds, stats.recent_count) {
                detailed.push(api.get_golf_round(summary.id).await?);
            }
            let view = golf_player_view(&golf, &snapshot.golf_rounds, &detailed, stats.recent_count);
            emit(cli.json, &view, report::render_golf_player)?;
        }

        Commands::Round { id } => {
            let round = api.get_golf_round(id).await?;
            emit(cli.json, &round_view(&round), report::render_round)?;
        }

        Commands::Rivalry { tally } => {
            let page = if tally {
                let snapshot = sync.load().await?;
                tallied_rivalry_page(&snapshot.games, &config.rivalry, stats.rivalry_recent)
            } else {
                let rivalry = api.rivalry().await?;
                rivalry_page(&rivalry, &config.rivalry, stats.rivalry_recent)
            };
            emit(cli.json, &page, report::render_rivalry)?;
        }

        Commands::Teams => {
            let teams = api.list_teams().await?;
            emit(cli.json, &teams_view(&teams), report::render_teams)?;
        }

        Commands::Team { id } => {
            let team = api.team_stats(id).await?;
            emit(cli.json, &team_detail_view(&team), report::render_team_detail)?;
        }

        Commands::Courses { query } => {
            let results = api.search_courses(&query).await?;
            emit(cli.json, &results, |r| report::render_courses(r))?;
        }

        Commands::AddPlayer { name } => {
            let added = sync.add_player(&NewPlayer::new(name)).await?;
            println!(
                "Added {} (id {}). {}",
                added.value.name,
                added.value.id,
                reload_summary(&added, "players", |s| s.players.len())
            );
        }

        Commands::AddGame {
            team1,
            team2,
            score1,
            score2,
            location,
        } => {
            let snapshot = sync.load().await?;
            let game = NewGame {
                team1_score: score1,
                team2_score: score2,
                team1_players: resolve_ids(&snapshot, &team1)?,
                team2_players: resolve_ids(&snapshot, &team2)?,
                location,
            };
            if score1 == score2 {
                tracing::warn!("Tied score; the backend will pick the winning side");
            }
            let recorded = sync.record_game(&game).await?;
            println!(
                "Recorded game {} ({}-{}). {}",
                recorded.value.id,
                recorded.value.team1_score,
                recorded.value.team2_score,
                reload_summary(&recorded, "games", |s| s.games.len())
            );
        }

        Commands::DeleteGame { id } => {
            let deleted = sync.delete_game(id).await?;
            println!(
                "Deleted game {}. {}",
                deleted.value,
                reload_summary(&deleted, "games", |s| s.games.len())
            );
        }

        Commands::DeleteRound { id } => {
            let deleted = sync.delete_golf_round(id).await?;
            println!(
                "Deleted round {}. {}",
                deleted.value,
                reload_summary(&deleted, "rounds", |s| s.golf_rounds.len())
            );
        }
    }

    Ok(())
}
