//! View models built from a loaded snapshot.
//!
//! Every builder is a pure function of its inputs: the data snapshot, the
//! explicit [`DashboardState`] and the reference time. Nothing is cached
//! between calls.

pub mod dashboard;
pub mod player;
pub mod rivalry;
pub mod round;

pub use dashboard::*;
pub use player::*;
pub use rivalry::*;
pub use round::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculate::{leaderboard, Medal, WinRecord};

/// Which game the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Dice,
    Golf,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sport::Dice => write!(f, "dice"),
            Sport::Golf => write!(f, "golf"),
        }
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dice" => Ok(Sport::Dice),
            "golf" => Ok(Sport::Golf),
            other => Err(format!("unknown sport '{other}', expected dice or golf")),
        }
    }
}

/// Selected sport and season filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub sport: Sport,
    /// Calendar year; `None` means all time.
    pub season: Option<i32>,
}

impl DashboardState {
    pub const fn new(sport: Sport, season: Option<i32>) -> Self {
        Self { sport, season }
    }
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub position: usize,
    pub medal: Option<Medal>,
    pub name: String,
    pub games_played: u32,
    pub win_percentage: u32,
    pub tied: bool,
}

/// Numbered rows for already-qualified entries.
pub fn leaderboard_rows<T: WinRecord>(entries: &[&T], limit: Option<usize>) -> Vec<LeaderboardRow> {
    leaderboard(entries.iter().copied(), limit)
        .into_iter()
        .map(|ranked| LeaderboardRow {
            position: ranked.position,
            medal: ranked.medal,
            name: ranked.entry.display_name().to_string(),
            games_played: ranked.entry.games_played(),
            win_percentage: ranked.win_percentage,
            tied: ranked.tied,
        })
        .collect()
}

/// Average margin rounded to one decimal, `None` when there were no games.
pub fn format_margin(margin: f64, games: u32) -> Option<String> {
    if games == 0 || !margin.is_finite() {
        None
    } else {
        Some(format!("{margin:.1}"))
    }
}
