//! Player model and per-player stat payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::validation::{validate_name, ValidationError};
use super::{GameSummary, GolfRoundSummary, PlayerId};

/// A player with backend-maintained cumulative dice counters.
///
/// Counters are updated only by the backend after game mutations; the
/// client never recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub games_played: u32,

    #[serde(default)]
    pub games_won: u32,

    #[serde(default)]
    pub total_points_scored: u32,

    #[serde(default)]
    pub total_points_against: u32,

    /// All-time win rate. Scale is not guaranteed: may be 0-1 or 0-100.
    #[serde(default)]
    pub win_percentage: f64,

    #[serde(default)]
    pub avg_win_margin: f64,

    #[serde(default)]
    pub avg_loss_margin: f64,
}

impl Player {
    /// Games lost (the dice game has no draws at the counter level).
    pub fn games_lost(&self) -> u32 {
        self.games_played.saturating_sub(self.games_won)
    }

    /// Points scored minus points conceded.
    pub fn point_differential(&self) -> i64 {
        i64::from(self.total_points_scored) - i64::from(self.total_points_against)
    }
}

/// Payload for creating a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Detailed dice statistics for one player, including recent games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    pub games_played: u32,
    pub games_won: u32,
    pub win_percentage: f64,
    pub avg_win_margin: f64,
    pub avg_loss_margin: f64,
    pub total_points_scored: u32,
    pub total_points_against: u32,

    #[serde(default)]
    pub recent_games: Vec<GameSummary>,
}

/// Golf leaderboard entry for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfPlayerStats {
    pub id: PlayerId,
    pub name: String,

    #[serde(default)]
    pub golf_rounds_played: u32,

    #[serde(default)]
    pub golf_rounds_won: u32,

    #[serde(default)]
    pub golf_rounds_lost: u32,

    #[serde(default)]
    pub golf_rounds_drawn: u32,

    #[serde(default)]
    pub golf_holes_won: u32,

    #[serde(default)]
    pub golf_holes_lost: u32,

    /// Golf win rate. Scale is not guaranteed: may be 0-1 or 0-100.
    #[serde(default)]
    pub golf_win_percentage: f64,

    #[serde(default)]
    pub recent_rounds: Vec<GolfRoundSummary>,
}
