//! Server-materialized teams (fixed trios of players).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{GameSummary, Player, PlayerId, TeamId};

/// A trio of players that has played enough games together to be tracked.
///
/// Team identity and qualification are computed by the backend; the client
/// only reads these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub player3_id: PlayerId,
    pub team_name: String,

    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,

    pub games_played: u32,
    pub games_won: u32,

    #[serde(default)]
    pub total_points_scored: u32,

    #[serde(default)]
    pub total_points_against: u32,

    /// Scale is not guaranteed: may be 0-1 or 0-100.
    pub win_percentage: f64,

    #[serde(default)]
    pub avg_loss_margin: f64,

    #[serde(default)]
    pub avg_win_margin: f64,

    #[serde(default)]
    pub player1: Option<Player>,

    #[serde(default)]
    pub player2: Option<Player>,

    #[serde(default)]
    pub player3: Option<Player>,
}

impl Team {
    /// Player ids as a sorted triple.
    pub fn member_ids(&self) -> [PlayerId; 3] {
        let mut ids = [self.player1_id, self.player2_id, self.player3_id];
        ids.sort();
        ids
    }

    pub fn point_differential(&self) -> i64 {
        i64::from(self.total_points_scored) - i64::from(self.total_points_against)
    }
}

/// Team list plus the qualification threshold the backend applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsList {
    pub teams: Vec<Team>,
    pub total_games: u32,
    pub min_games_required: u32,
    pub threshold_percentage: f64,
}

/// Detailed statistics for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub id: TeamId,
    pub team_name: String,
    pub games_played: u32,
    pub games_won: u32,
    pub win_percentage: f64,
    pub avg_win_margin: f64,
    pub avg_loss_margin: f64,
    pub total_points_scored: u32,
    pub total_points_against: u32,

    #[serde(default)]
    pub players: Vec<Player>,

    #[serde(default)]
    pub recent_games: Vec<GameSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teams_list_deserialize() {
        let json = r#"{
            "teams": [{
                "id": 1, "player1_id": 9, "player2_id": 2, "player3_id": 5,
                "team_name": "Nary/Pendleton/Silverman",
                "games_played": 6, "games_won": 4,
                "total_points_scored": 120, "total_points_against": 100,
                "win_percentage": 66.7
            }],
            "total_games": 15,
            "min_games_required": 5,
            "threshold_percentage": 33.3
        }"#;

        let list: TeamsList = serde_json::from_str(json).unwrap();
        assert_eq!(list.teams.len(), 1);
        assert_eq!(
            list.teams[0].member_ids(),
            [PlayerId::new(2), PlayerId::new(5), PlayerId::new(9)]
        );
        assert_eq!(list.teams[0].point_differential(), 20);
        assert!(list.teams[0].player1.is_none());
    }
}
