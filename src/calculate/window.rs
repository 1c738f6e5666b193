//! Trailing-window statistics.
//!
//! Two independent windows, both recomputed from the full history on every
//! call:
//! - a time window (contests played in the last N days), and
//! - a count window (a player's N most recent contests).

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::rounded_percent;
use crate::models::{Contest, Outcome, TeamSide};

/// Default trailing time window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Default trailing count window (dice stats and golf recent rounds).
pub const RECENT_COUNT: usize = 10;

/// Summary of the contests inside a trailing time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowSummary {
    pub total: usize,
    /// Distinct names across both rosters of every contest in the window.
    pub distinct_players: usize,
    /// Rounded mean of each contest's combined score; `None` without data.
    pub average_combined_score: Option<u32>,
}

impl WindowSummary {
    /// Nothing was played in the window ("no recent data").
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Contests with `played_at >= now - window`.
pub fn within_window<C: Contest>(contests: &[C], now: NaiveDateTime, window: Duration) -> Vec<&C> {
    let cutoff = now - window;
    contests.iter().filter(|c| c.played_at() >= cutoff).collect()
}

/// Count, distinct participants and average combined score over a window.
pub fn summarize_window<C: Contest>(
    contests: &[C],
    now: NaiveDateTime,
    window: Duration,
) -> WindowSummary {
    let recent = within_window(contests, now, window);

    let distinct_players = recent
        .iter()
        .flat_map(|c| {
            c.roster(TeamSide::One)
                .iter()
                .chain(c.roster(TeamSide::Two).iter())
        })
        .map(|name| name.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    let scores: Vec<u32> = recent.iter().filter_map(|c| c.combined_score()).collect();
    let average_combined_score = if scores.is_empty() {
        None
    } else {
        let sum: u64 = scores.iter().map(|s| u64::from(*s)).sum();
        Some((sum as f64 / scores.len() as f64).round() as u32)
    };

    WindowSummary {
        total: recent.len(),
        distinct_players,
        average_combined_score,
    }
}

/// A player's `limit` most recent contests, newest first.
///
/// Ordering is by `played_at` descending; equal timestamps keep input order.
pub fn recent_contests<'a, C: Contest>(
    player_name: &str,
    contests: &'a [C],
    limit: usize,
) -> Vec<&'a C> {
    let mut played: Vec<&C> = contests
        .iter()
        .filter(|c| c.side_of(player_name).is_some())
        .collect();
    played.sort_by(|a, b| b.played_at().cmp(&a.played_at()));
    played.truncate(limit);
    played
}

/// Win/loss/draw record over a player's trailing-N slice.
///
/// Distinct from the player's all-time win percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecentForm {
    /// Requested window size.
    pub limit: usize,
    /// Contests actually in the slice (may be fewer than `limit`).
    pub considered: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl RecentForm {
    /// Wins over contests considered; `None` when the slice is empty.
    pub fn win_percentage(&self) -> Option<u32> {
        rounded_percent(self.wins, self.considered)
    }

    pub const fn is_empty(&self) -> bool {
        self.considered == 0
    }
}

/// Recompute a player's trailing-N form from the full history.
pub fn recent_form<C: Contest>(player_name: &str, contests: &[C], limit: usize) -> RecentForm {
    let mut form = RecentForm {
        limit,
        ..RecentForm::default()
    };

    for contest in recent_contests(player_name, contests, limit) {
        form.considered += 1;
        match contest.outcome_for(player_name) {
            Some(Outcome::Win) => form.wins += 1,
            Some(Outcome::Loss) => form.losses += 1,
            Some(Outcome::Draw) => form.draws += 1,
            None => {}
        }
    }

    form
}
