//! Rivalry aggregate between two named factions.
//!
//! The backend keys the payload by its faction names ("orchard" and
//! "dreher"); these are mapped onto neutral first/second faction fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::GameId;

/// One game between the two factions, seen from the factions' side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalryGame {
    pub id: GameId,
    pub played_at: NaiveDateTime,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(rename = "orchard_players", alias = "first_players", default)]
    pub first_players: Vec<String>,

    #[serde(rename = "dreher_players", alias = "second_players", default)]
    pub second_players: Vec<String>,

    #[serde(rename = "orchard_score", alias = "first_score")]
    pub first_score: u32,

    #[serde(rename = "dreher_score", alias = "second_score")]
    pub second_score: u32,

    /// Name of the winning faction.
    pub winner: String,
}

/// Aggregate win and point totals for the two factions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalryStats {
    pub total_games: u32,

    #[serde(rename = "orchard_wins", alias = "first_wins")]
    pub first_wins: u32,

    #[serde(rename = "dreher_wins", alias = "second_wins")]
    pub second_wins: u32,

    /// Scale is not guaranteed: may be 0-1 or 0-100.
    #[serde(rename = "orchard_win_percentage", alias = "first_win_percentage")]
    pub first_win_percentage: f64,

    #[serde(rename = "dreher_win_percentage", alias = "second_win_percentage")]
    pub second_win_percentage: f64,

    #[serde(rename = "total_orchard_points", alias = "first_points")]
    pub first_points: u32,

    #[serde(rename = "total_dreher_points", alias = "second_points")]
    pub second_points: u32,

    /// First faction's points minus second faction's points.
    pub point_differential: i64,

    #[serde(default)]
    pub recent_games: Vec<RivalryGame>,
}

impl RivalryStats {
    pub const fn empty() -> Self {
        Self {
            total_games: 0,
            first_wins: 0,
            second_wins: 0,
            first_win_percentage: 0.0,
            second_win_percentage: 0.0,
            first_points: 0,
            second_points: 0,
            point_differential: 0,
            recent_games: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rivalry_stats_deserialize_backend_names() {
        let json = r#"{
            "total_games": 4,
            "orchard_wins": 3,
            "dreher_wins": 1,
            "orchard_win_percentage": 75.0,
            "dreher_win_percentage": 25.0,
            "total_orchard_points": 80,
            "total_dreher_points": 62,
            "point_differential": 18,
            "recent_games": [{
                "id": 7,
                "played_at": "2025-10-04T13:00:00",
                "location": "Lot A",
                "orchard_team": 1,
                "dreher_team": 2,
                "orchard_players": ["Sean Nary"],
                "dreher_players": ["AJ Partridge"],
                "orchard_score": 21,
                "dreher_score": 12,
                "winner": "Orchard"
            }]
        }"#;

        let stats: RivalryStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.first_wins, 3);
        assert_eq!(stats.second_points, 62);
        assert_eq!(stats.recent_games[0].first_score, 21);
        assert_eq!(stats.recent_games[0].winner, "Orchard");
    }

    #[test]
    fn test_rivalry_stats_empty() {
        let stats = RivalryStats::empty();
        assert_eq!(stats.total_games, 0);
        assert!(stats.recent_games.is_empty());
    }
}
