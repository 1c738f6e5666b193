//! Rivalry page and the team leaderboard.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{leaderboard_rows, LeaderboardRow};
use crate::calculate::{rivalry_view, tally_rivalry, RivalryView};
use crate::config::RivalryConfig;
use crate::models::{GameId, GameSummary, RivalryGame, RivalryStats, TeamsList};

/// Where the rivalry numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RivalrySource {
    Backend,
    Tally,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RivalryLine {
    pub id: GameId,
    pub played_at: NaiveDateTime,
    pub location: Option<String>,
    pub winner: String,
    /// "21-12", first faction's score first.
    pub score: String,
    pub first_players: Vec<String>,
    pub second_players: Vec<String>,
}

impl From<&RivalryGame> for RivalryLine {
    fn from(game: &RivalryGame) -> Self {
        Self {
            id: game.id,
            played_at: game.played_at,
            location: game.location.clone(),
            winner: game.winner.clone(),
            score: format!("{}-{}", game.first_score, game.second_score),
            first_players: game.first_players.clone(),
            second_players: game.second_players.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RivalryPage {
    pub source: RivalrySource,
    pub summary: RivalryView,
    pub recent: Vec<RivalryLine>,
}

/// Rivalry page from the backend aggregate.
pub fn rivalry_page(stats: &RivalryStats, config: &RivalryConfig, recent_limit: usize) -> RivalryPage {
    build_page(RivalrySource::Backend, stats, config, recent_limit)
}

/// Rivalry page recomputed from game summaries with the configured factions.
pub fn tallied_rivalry_page(
    games: &[GameSummary],
    config: &RivalryConfig,
    recent_limit: usize,
) -> RivalryPage {
    let stats = tally_rivalry(games, &config.first, &config.second, recent_limit);
    build_page(RivalrySource::Tally, &stats, config, recent_limit)
}

fn build_page(
    source: RivalrySource,
    stats: &RivalryStats,
    config: &RivalryConfig,
    recent_limit: usize,
) -> RivalryPage {
    RivalryPage {
        source,
        summary: rivalry_view(stats, &config.first.name, &config.second.name),
        recent: stats
            .recent_games
            .iter()
            .take(recent_limit)
            .map(RivalryLine::from)
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamsView {
    pub total_games: u32,
    pub min_games_required: u32,
    pub threshold_percent: f64,
    pub leaderboard: Vec<LeaderboardRow>,
}

impl TeamsView {
    pub fn is_insufficient(&self) -> bool {
        self.leaderboard.is_empty()
    }
}

/// Team leaderboard. The backend has already applied its threshold; teams
/// under `min_games_required` are still dropped in case it did not.
pub fn teams_view(list: &TeamsList) -> TeamsView {
    let eligible: Vec<_> = list
        .teams
        .iter()
        .filter(|t| t.games_played >= list.min_games_required)
        .collect();

    TeamsView {
        total_games: list.total_games,
        min_games_required: list.min_games_required,
        threshold_percent: list.threshold_percentage,
        leaderboard: leaderboard_rows(&eligible, None),
    }
}
