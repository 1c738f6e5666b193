//! Golf round models.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::validation::{validate_rosters, ValidationError};
use super::{Contest, CourseId, CourseTee, Player, PlayerId, RoundId, TeamSide};

/// Holes in a full round.
pub const HOLES_PER_ROUND: usize = 18;

/// Players per side in a golf round.
pub const GOLF_ROSTER_SIZE: usize = 2;

/// Outcome of one hole. `winner_team == None` means the hole was halved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfHoleResult {
    pub hole_number: u8,
    pub winner_team: Option<TeamSide>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub par: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yardage: Option<u32>,
}

impl GolfHoleResult {
    pub const fn new(hole_number: u8, winner_team: Option<TeamSide>) -> Self {
        Self {
            hole_number,
            winner_team,
            par: None,
            yardage: None,
        }
    }

    pub const fn with_par(mut self, par: u8) -> Self {
        self.par = Some(par);
        self
    }

    pub const fn is_halved(&self) -> bool {
        self.winner_team.is_none()
    }
}

/// Hole counts and winner derived from a list of hole results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    pub team1_holes_won: u32,
    pub team2_holes_won: u32,
    pub halved_holes: u32,
    pub winner_team: Option<TeamSide>,
}

impl RoundTally {
    /// Count holes per side; the side with more holes wins, equal is halved.
    pub fn from_holes(holes: &[GolfHoleResult]) -> Self {
        let mut tally = Self::default();
        for hole in holes {
            match hole.winner_team {
                Some(TeamSide::One) => tally.team1_holes_won += 1,
                Some(TeamSide::Two) => tally.team2_holes_won += 1,
                None => tally.halved_holes += 1,
            }
        }
        tally.winner_team = match tally.team1_holes_won.cmp(&tally.team2_holes_won) {
            std::cmp::Ordering::Greater => Some(TeamSide::One),
            std::cmp::Ordering::Less => Some(TeamSide::Two),
            std::cmp::Ordering::Equal => None,
        };
        tally
    }

    pub const fn total_holes(&self) -> u32 {
        self.team1_holes_won + self.team2_holes_won + self.halved_holes
    }
}

/// Lightweight round record as returned by the round list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfRoundSummary {
    pub id: RoundId,

    #[serde(default)]
    pub course: Option<String>,

    pub played_at: NaiveDateTime,
    pub team1_holes_won: u32,
    pub team2_holes_won: u32,
    pub halved_holes: u32,
    pub winner_team: Option<TeamSide>,

    #[serde(default)]
    pub team1_player_names: Vec<String>,

    #[serde(default)]
    pub team2_player_names: Vec<String>,
}

impl GolfRoundSummary {
    /// Holes won by one side.
    pub const fn holes_won(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::One => self.team1_holes_won,
            TeamSide::Two => self.team2_holes_won,
        }
    }

    /// Whether the hole counts add up to a full round.
    pub const fn is_complete(&self) -> bool {
        (self.team1_holes_won + self.team2_holes_won + self.halved_holes) as usize
            == HOLES_PER_ROUND
    }
}

impl Contest for GolfRoundSummary {
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
        self.winner_team
    }

    /// Holes decided (not halved).
    fn combined_score(&self) -> Option<u32> {
        Some(self.team1_holes_won + self.team2_holes_won)
    }
}

/// Full round with players, hole-by-hole detail and optional course link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfRound {
    pub id: RoundId,

    #[serde(default)]
    pub course: Option<String>,

    pub played_at: NaiveDateTime,
    pub team1_holes_won: u32,
    pub team2_holes_won: u32,
    pub halved_holes: u32,
    pub winner_team: Option<TeamSide>,

    #[serde(default)]
    pub team1_players: Vec<Player>,

    #[serde(default)]
    pub team2_players: Vec<Player>,

    #[serde(default)]
    pub hole_results: Vec<GolfHoleResult>,

    #[serde(default)]
    pub course_id: Option<CourseId>,

    #[serde(default)]
    pub tee: Option<CourseTee>,
}

impl GolfRound {
    /// Which side a player was on, by roster membership.
    pub fn side_of(&self, player_name: &str) -> Option<TeamSide> {
        let player_name = player_name.trim();
        let on = |roster: &[Player]| {
            roster
                .iter()
                .any(|p| p.name.trim().eq_ignore_ascii_case(player_name))
        };
        if on(&self.team1_players) {
            Some(TeamSide::One)
        } else if on(&self.team2_players) {
            Some(TeamSide::Two)
        } else {
            None
        }
    }

    /// Hole results ordered by hole number.
    pub fn ordered_holes(&self) -> Vec<&GolfHoleResult> {
        let mut holes: Vec<_> = self.hole_results.iter().collect();
        holes.sort_by_key(|h| h.hole_number);
        holes
    }
}

fn validate_holes(holes: &[GolfHoleResult]) -> Result<(), ValidationError> {
    if holes.len() != HOLES_PER_ROUND {
        return Err(ValidationError::HoleCount {
            expected: HOLES_PER_ROUND,
            actual: holes.len(),
        });
    }
    let mut seen = HashSet::new();
    for hole in holes {
        if hole.hole_number == 0 || usize::from(hole.hole_number) > HOLES_PER_ROUND {
            return Err(ValidationError::HoleOutOfRange(hole.hole_number));
        }
        if !seen.insert(hole.hole_number) {
            return Err(ValidationError::DuplicateHole(hole.hole_number));
        }
    }
    Ok(())
}

/// Copy par and yardage from a course tee onto hole results, by hole number.
///
/// Holes the tee does not list are left untouched.
pub fn apply_tee(holes: &mut [GolfHoleResult], tee: &CourseTee) {
    for hole in holes.iter_mut() {
        if let Some(course_hole) = tee.hole(hole.hole_number) {
            hole.par = Some(course_hole.par);
            hole.yardage = Some(course_hole.yardage);
        }
    }
}

/// Payload for recording a new golf round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGolfRound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    pub team1_players: Vec<PlayerId>,
    pub team2_players: Vec<PlayerId>,
    pub holes: Vec<GolfHoleResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tee_id: Option<i64>,
}

impl NewGolfRound {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_rosters(&self.team1_players, &self.team2_players, GOLF_ROSTER_SIZE)?;
        validate_holes(&self.holes)
    }

    /// Preview the result the backend will record.
    pub fn tally(&self) -> RoundTally {
        RoundTally::from_holes(&self.holes)
    }

    /// Populate par/yardage from a course tee and link it.
    pub fn with_tee(mut self, course_id: CourseId, tee: &CourseTee) -> Self {
        apply_tee(&mut self.holes, tee);
        self.course_id = Some(course_id);
        self.tee_id = tee.id;
        self
    }
}

/// Partial update for an existing golf round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolfRoundUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_players: Option<Vec<PlayerId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_players: Option<Vec<PlayerId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub holes: Option<Vec<GolfHoleResult>>,
}

impl GolfRoundUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self == &Self::default() {
            return Err(ValidationError::EmptyUpdate);
        }
        match (&self.team1_players, &self.team2_players) {
            (Some(team1), Some(team2)) => validate_rosters(team1, team2, GOLF_ROSTER_SIZE)?,
            (Some(roster), None) | (None, Some(roster)) => {
                let side = if self.team1_players.is_some() {
                    TeamSide::One
                } else {
                    TeamSide::Two
                };
                if roster.len() != GOLF_ROSTER_SIZE {
                    return Err(ValidationError::RosterSize {
                        side,
                        expected: GOLF_ROSTER_SIZE,
                        actual: roster.len(),
                    });
                }
            }
            (None, None) => {}
        }
        if let Some(holes) = &self.holes {
            validate_holes(holes)?;
        }
        Ok(())
    }
}
