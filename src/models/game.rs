//! Dice game models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::validation::{validate_location, validate_rosters, ValidationError};
use super::{Contest, GameId, Player, PlayerId, TeamSide};

/// Players per side in a dice game.
pub const DICE_ROSTER_SIZE: usize = 3;

/// Lightweight game record as returned by the game list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub team1_score: u32,
    pub team2_score: u32,
    pub winner_team: TeamSide,

    #[serde(default)]
    pub location: Option<String>,

    pub played_at: NaiveDateTime,

    #[serde(default)]
    pub team1_player_names: Vec<String>,

    #[serde(default)]
    pub team2_player_names: Vec<String>,
}

impl GameSummary {
    /// Score for one side.
    pub const fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::One => self.team1_score,
            TeamSide::Two => self.team2_score,
        }
    }

    /// Absolute score difference.
    pub const fn margin(&self) -> u32 {
        self.team1_score.abs_diff(self.team2_score)
    }

    /// Whether the recorded winner agrees with the scores.
    ///
    /// A tied score may be recorded with either side as winner.
    pub fn is_consistent(&self) -> bool {
        match self.team1_score.cmp(&self.team2_score) {
            std::cmp::Ordering::Greater => self.winner_team == TeamSide::One,
            std::cmp::Ordering::Less => self.winner_team == TeamSide::Two,
            std::cmp::Ordering::Equal => true,
        }
    }
}

impl Contest for GameSummary {
    fn played_at(&self) -> NaiveDateTime {
        self.played_at
    }

    fn roster(&self, side: TeamSide) -> &[String] {
        match side {
            TeamSide::One => &self.team1_player_names,
            TeamSide::Two => &self.team2_player_names,
        }
    }

    fn winner(&self) -> Option<TeamSide> {
        Some(self.winner_team)
    }

    fn combined_score(&self) -> Option<u32> {
        Some(self.team1_score + self.team2_score)
    }
}

/// Full game record with player objects, as returned for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub team1_score: u32,
    pub team2_score: u32,
    pub winner_team: TeamSide,

    #[serde(default)]
    pub location: Option<String>,

    pub played_at: NaiveDateTime,

    #[serde(default)]
    pub team1_players: Vec<Player>,

    #[serde(default)]
    pub team2_players: Vec<Player>,
}

/// Payload for recording a new dice game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub team1_score: u32,
    pub team2_score: u32,
    pub team1_players: Vec<PlayerId>,
    pub team2_players: Vec<PlayerId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl NewGame {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_rosters(&self.team1_players, &self.team2_players, DICE_ROSTER_SIZE)?;
        validate_location(self.location.as_deref())
    }
}

/// Partial update for an existing dice game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_players: Option<Vec<PlayerId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_players: Option<Vec<PlayerId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl GameUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        match (&self.team1_players, &self.team2_players) {
            (Some(team1), Some(team2)) => validate_rosters(team1, team2, DICE_ROSTER_SIZE)?,
            (Some(roster), None) | (None, Some(roster)) => {
                let side = if self.team1_players.is_some() {
                    TeamSide::One
                } else {
                    TeamSide::Two
                };
                if roster.len() != DICE_ROSTER_SIZE {
                    return Err(ValidationError::RosterSize {
                        side,
                        expected: DICE_ROSTER_SIZE,
                        actual: roster.len(),
                    });
                }
            }
            (None, None) => {}
        }
        validate_location(self.location.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId::new).collect()
    }

    fn summary_json() -> &'static str {
        r#"{
            "id": 11,
            "team1_score": 21,
            "team2_score": 15,
            "winner_team": 1,
            "location": null,
            "played_at": "2025-09-06T14:05:00",
            "team1_player_names": ["Sean Nary", "Tyler Pendleton", "Reid Silverman"],
            "team2_player_names": ["Jeremy Cortazzo", "Danny Wersching", "AJ Partridge"]
        }"#
    }

    #[test]
    fn test_game_summary_deserialize() {
        let game: GameSummary = serde_json::from_str(summary_json()).unwrap();
        assert_eq!(game.winner_team, TeamSide::One);
        assert_eq!(game.margin(), 6);
        assert_eq!(game.combined_score(), Some(36));
        assert!(game.is_consistent());
    }

    #[test]
    fn test_game_summary_contest_lookup() {
        let game: GameSummary = serde_json::from_str(summary_json()).unwrap();
        assert_eq!(game.side_of("reid silverman"), Some(TeamSide::One));
        assert_eq!(game.side_of("AJ Partridge"), Some(TeamSide::Two));
        assert_eq!(game.side_of("Brendan Meagher"), None);
    }

    #[test]
    fn test_contest_lookup_ignores_stray_whitespace() {
        let mut game: GameSummary = serde_json::from_str(summary_json()).unwrap();
        game.team2_player_names[2] = " AJ Partridge  ".to_string();

        assert_eq!(game.side_of("aj partridge"), Some(TeamSide::Two));
        assert_eq!(game.side_of(" AJ Partridge"), Some(TeamSide::Two));
        assert_eq!(
            game.outcome_for("AJ Partridge"),
            Some(crate::models::Outcome::Loss)
        );

        let season = crate::calculate::season_table(std::slice::from_ref(&game), 2025);
        let form = crate::calculate::recent_form("AJ Partridge", std::slice::from_ref(&game), 10);
        let record = season
            .records
            .iter()
            .find(|r| r.name == "AJ Partridge")
            .unwrap();
        assert_eq!(record.games_played, 1);
        assert_eq!(form.considered, 1);
        assert_eq!(form.losses, 1);
    }

    #[test]
    fn test_inconsistent_winner_detected() {
        let mut game: GameSummary = serde_json::from_str(summary_json()).unwrap();
        game.winner_team = TeamSide::Two;
        assert!(!game.is_consistent());

        game.team2_score = 21;
        assert!(game.is_consistent());
    }

    #[test]
    fn test_new_game_validation() {
        let game = NewGame {
            team1_score: 21,
            team2_score: 18,
            team1_players: ids(&[1, 2, 3]),
            team2_players: ids(&[4, 5, 6]),
            location: Some("Lot C".to_string()),
        };
        assert!(game.validate().is_ok());

        let bad = NewGame {
            team2_players: ids(&[4, 5]),
            ..game
        };
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::RosterSize { actual: 2, .. })
        ));
    }

    #[test]
    fn test_new_game_omits_missing_location() {
        let game = NewGame {
            team1_score: 1,
            team2_score: 0,
            team1_players: ids(&[1, 2, 3]),
            team2_players: ids(&[4, 5, 6]),
            location: None,
        };
        let json = serde_json::to_string(&game).unwrap();
        assert!(!json.contains("location"));
    }

    #[test]
    fn test_game_update_validation() {
        assert_eq!(
            GameUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );

        let scores_only = GameUpdate {
            team1_score: Some(21),
            ..Default::default()
        };
        assert!(scores_only.validate().is_ok());

        let short_roster = GameUpdate {
            team2_players: Some(ids(&[4])),
            ..Default::default()
        };
        assert!(matches!(
            short_roster.validate(),
            Err(ValidationError::RosterSize {
                side: TeamSide::Two,
                ..
            })
        ));
    }
}
