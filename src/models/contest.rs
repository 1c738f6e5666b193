//! Team sides and the common shape of a completed contest.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two opposing sides in a game or round.
///
/// The backend encodes sides as the integers `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    /// The opposing side.
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::One => TeamSide::Two,
            TeamSide::Two => TeamSide::One,
        }
    }

    /// Backend team number.
    pub const fn number(self) -> u8 {
        match self {
            TeamSide::One => 1,
            TeamSide::Two => 2,
        }
    }
}

impl TryFrom<u8> for TeamSide {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamSide::One),
            2 => Ok(TeamSide::Two),
            other => Err(format!("invalid team number {other}, expected 1 or 2")),
        }
    }
}

impl From<TeamSide> for u8 {
    fn from(side: TeamSide) -> Self {
        side.number()
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

/// Result of a contest from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// A completed game or round with two name rosters.
///
/// Implemented by both dice game summaries and golf round summaries so the
/// windowed aggregations can run over either sport.
pub trait Contest {
    /// When the contest was played.
    fn played_at(&self) -> NaiveDateTime;

    /// Player names on the given side.
    fn roster(&self, side: TeamSide) -> &[String];

    /// Winning side, `None` for a halved/drawn contest.
    fn winner(&self) -> Option<TeamSide>;

    /// Combined score used for averages, if the sport has one.
    fn combined_score(&self) -> Option<u32>;

    /// Which side a player was on, looked up by roster name (trimmed,
    /// case-insensitive).
    fn side_of(&self, player_name: &str) -> Option<TeamSide> {
        let player_name = player_name.trim();
        [TeamSide::One, TeamSide::Two].into_iter().find(|side| {
            self.roster(*side)
                .iter()
                .any(|name| name.trim().eq_ignore_ascii_case(player_name))
        })
    }

    /// Outcome for a player, `None` if the player did not take part.
    fn outcome_for(&self, player_name: &str) -> Option<Outcome> {
        let side = self.side_of(player_name)?;
        Some(match self.winner() {
            Some(winner) if winner == side => Outcome::Win,
            Some(_) => Outcome::Loss,
            None => Outcome::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_side_serialization() {
        assert_eq!(serde_json::to_string(&TeamSide::One).unwrap(), "1");
        assert_eq!(serde_json::to_string(&TeamSide::Two).unwrap(), "2");

        let side: TeamSide = serde_json::from_str("2").unwrap();
        assert_eq!(side, TeamSide::Two);
    }

    #[test]
    fn test_team_side_rejects_other_numbers() {
        assert!(serde_json::from_str::<TeamSide>("3").is_err());
        assert!(serde_json::from_str::<TeamSide>("0").is_err());
    }

    #[test]
    fn test_optional_side_null_is_none() {
        let side: Option<TeamSide> = serde_json::from_str("null").unwrap();
        assert_eq!(side, None);
    }

    #[test]
    fn test_team_side_opponent() {
        assert_eq!(TeamSide::One.opponent(), TeamSide::Two);
        assert_eq!(TeamSide::Two.opponent(), TeamSide::One);
    }

    #[test]
    fn test_team_side_display() {
        assert_eq!(format!("{}", TeamSide::Two), "Team 2");
    }
}
