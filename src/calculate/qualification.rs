//! Minimum-participation filter for leaderboard eligibility.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use super::{percent_of, WinRecord};
use crate::models::{Contest, Outcome, TeamSide};

/// Share of all games an entry must have played to be ranked.
pub const QUALIFICATION_FRACTION: f64 = 0.333;

/// Threshold shown to users, in percent.
pub const QUALIFICATION_PERCENT: f64 = 33.3;

/// `ceil(total_games * 0.333)`.
pub fn min_games_required(total_games: u32) -> u32 {
    (f64::from(total_games) * QUALIFICATION_FRACTION).ceil() as u32
}

/// Entries that met the participation threshold.
#[derive(Debug, Clone, Serialize)]
pub struct Qualification<'a, T> {
    pub total_games: u32,
    pub min_games_required: u32,
    pub qualified: Vec<&'a T>,
}

impl<T> Qualification<'_, T> {
    /// True when nobody qualified; render "not enough data", not an empty ranking.
    pub fn is_insufficient(&self) -> bool {
        self.qualified.is_empty()
    }
}

/// Keep entries with `games_played >= min_games_required` and at least one game.
pub fn qualify<T: WinRecord>(total_games: u32, entries: &[T]) -> Qualification<'_, T> {
    let min_games_required = min_games_required(total_games);
    let qualified = entries
        .iter()
        .filter(|e| e.games_played() >= min_games_required && e.games_played() > 0)
        .collect();

    Qualification {
        total_games,
        min_games_required,
        qualified,
    }
}

/// A player's record within one season, derived from contest rosters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub name: String,
    pub games_played: u32,
    pub games_won: u32,
    pub games_drawn: u32,
}

impl SeasonRecord {
    pub const fn games_lost(&self) -> u32 {
        self.games_played - self.games_won - self.games_drawn
    }
}

impl WinRecord for SeasonRecord {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Fraction scale (0-1), so small percentages are never misread.
    fn raw_win_rate(&self) -> f64 {
        percent_of(self.games_won, self.games_played).map_or(0.0, |p| p / 100.0)
    }
}

/// Per-player records for the contests played in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTable {
    pub year: i32,
    pub total_games: u32,
    pub records: Vec<SeasonRecord>,
}

impl SeasonTable {
    /// Apply the qualification threshold to this season's own total.
    pub fn qualify(&self) -> Qualification<'_, SeasonRecord> {
        qualify(self.total_games, &self.records)
    }
}

/// Build a season table from contest rosters.
///
/// Records appear in order of each player's first appearance in `contests`,
/// so downstream tie-breaking stays deterministic. Names match
/// case-insensitively; the first spelling seen is kept.
pub fn season_table<C: Contest>(contests: &[C], year: i32) -> SeasonTable {
    let mut records: Vec<SeasonRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut total_games = 0;

    for contest in contests.iter().filter(|c| c.played_at().year() == year) {
        total_games += 1;
        for side in [TeamSide::One, TeamSide::Two] {
            for name in contest.roster(side) {
                let key = name.trim().to_lowercase();
                let slot = *index.entry(key).or_insert_with(|| {
                    records.push(SeasonRecord {
                        name: name.trim().to_string(),
                        games_played: 0,
                        games_won: 0,
                        games_drawn: 0,
                    });
                    records.len() - 1
                });
                let record = &mut records[slot];
                record.games_played += 1;
                match contest.outcome_for(name) {
                    Some(Outcome::Win) => record.games_won += 1,
                    Some(Outcome::Draw) => record.games_drawn += 1,
                    Some(Outcome::Loss) | None => {}
                }
            }
        }
    }

    SeasonTable {
        year,
        total_games,
        records,
    }
}
