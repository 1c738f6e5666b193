//! Dashboard: qualified leaderboard, top winners and the weekly summary.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{leaderboard_rows, DashboardState, LeaderboardRow};
use crate::calculate::{
    qualify, season_table, summarize_window, top_winners, WinRecord, WindowSummary,
    QUALIFICATION_PERCENT,
};
use crate::config::StatsConfig;
use crate::models::{GameSummary, GolfPlayerStats, GolfRoundSummary, Player};

/// Rows shown on the dashboard leaderboard.
pub const LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub state: DashboardState,
    pub total_games: u32,
    pub min_games_required: u32,
    pub threshold_percent: f64,
    pub leaderboard: Vec<LeaderboardRow>,
    /// Everyone tied at the top percentage.
    pub top_winners: Vec<String>,
    pub top_win_percentage: Option<u32>,
    pub recent: WindowSummary,
    pub window_days: i64,
}

impl DashboardView {
    /// Nobody qualified: show "not enough data" instead of a ranking.
    pub fn is_insufficient(&self) -> bool {
        self.leaderboard.is_empty()
    }
}

fn build<T: WinRecord>(
    state: DashboardState,
    total_games: u32,
    entries: &[T],
    recent: WindowSummary,
    window_days: i64,
) -> DashboardView {
    let qualification = qualify(total_games, entries);
    let winners = top_winners(qualification.qualified.iter().copied());

    DashboardView {
        state,
        total_games,
        min_games_required: qualification.min_games_required,
        threshold_percent: QUALIFICATION_PERCENT,
        leaderboard: leaderboard_rows(&qualification.qualified, Some(LEADERBOARD_LIMIT)),
        top_win_percentage: winners.first().map(|w| w.win_percentage()),
        top_winners: winners
            .iter()
            .map(|w| w.display_name().to_string())
            .collect(),
        recent,
        window_days,
    }
}

/// Dice dashboard from backend player counters, or from a season table when
/// a season is selected.
pub fn dice_dashboard(
    players: &[Player],
    games: &[GameSummary],
    state: DashboardState,
    now: NaiveDateTime,
    stats: &StatsConfig,
) -> DashboardView {
    let recent = summarize_window(games, now, stats.recent_window());
    match state.season {
        None => build(
            state,
            games.len() as u32,
            players,
            recent,
            stats.recent_window_days,
        ),
        Some(year) => {
            let table = season_table(games, year);
            build(
                state,
                table.total_games,
                &table.records,
                recent,
                stats.recent_window_days,
            )
        }
    }
}

/// Golf dashboard from the golf leaderboard, or from a season table when a
/// season is selected.
pub fn golf_dashboard(
    golf_stats: &[GolfPlayerStats],
    rounds: &[GolfRoundSummary],
    state: DashboardState,
    now: NaiveDateTime,
    stats: &StatsConfig,
) -> DashboardView {
    let recent = summarize_window(rounds, now, stats.recent_window());
    match state.season {
        None => build(
            state,
            rounds.len() as u32,
            golf_stats,
            recent,
            stats.recent_window_days,
        ),
        Some(year) => {
            let table = season_table(rounds, year);
            build(
                state,
                table.total_games,
                &table.records,
                recent,
                stats.recent_window_days,
            )
        }
    }
}
