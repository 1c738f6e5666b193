//! Golf round detail.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calculate::{par_breakdown, ParBreakdown};
use crate::models::{GolfRound, RoundId, RoundTally, TeamSide, HOLES_PER_ROUND};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoleLine {
    pub hole_number: u8,
    pub par: Option<u8>,
    pub yardage: Option<u32>,
    /// `None` for a halved hole.
    pub winner: Option<TeamSide>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub id: RoundId,
    pub course: Option<String>,
    pub tee_name: Option<String>,
    pub played_at: NaiveDateTime,
    pub team1: Vec<String>,
    pub team2: Vec<String>,
    /// Recounted from the hole results, not the stored counters.
    pub tally: RoundTally,
    pub holes: Vec<HoleLine>,
    /// From team 1's point of view.
    pub par_breakdown: ParBreakdown,
}

impl RoundView {
    pub fn is_complete(&self) -> bool {
        self.holes.len() == HOLES_PER_ROUND
    }

    /// "Team 1 wins 7-5" or "Halved 6-6".
    pub fn result_label(&self) -> String {
        let t = &self.tally;
        match t.winner_team {
            Some(side) => format!(
                "{side} wins {}-{}",
                t.team1_holes_won.max(t.team2_holes_won),
                t.team1_holes_won.min(t.team2_holes_won)
            ),
            None => format!("Halved {}-{}", t.team1_holes_won, t.team2_holes_won),
        }
    }
}

pub fn round_view(round: &GolfRound) -> RoundView {
    let holes: Vec<HoleLine> = round
        .ordered_holes()
        .into_iter()
        .map(|h| HoleLine {
            hole_number: h.hole_number,
            par: h.par,
            yardage: h.yardage,
            winner: h.winner_team,
        })
        .collect();

    let tally = if round.hole_results.is_empty() {
        RoundTally {
            team1_holes_won: round.team1_holes_won,
            team2_holes_won: round.team2_holes_won,
            halved_holes: round.halved_holes,
            winner_team: round.winner_team,
        }
    } else {
        RoundTally::from_holes(&round.hole_results)
    };

    RoundView {
        id: round.id,
        course: round.course.clone(),
        tee_name: round.tee.as_ref().map(|t| t.tee_name.clone()),
        played_at: round.played_at,
        team1: round.team1_players.iter().map(|p| p.name.clone()).collect(),
        team2: round.team2_players.iter().map(|p| p.name.clone()).collect(),
        tally,
        holes,
        par_breakdown: par_breakdown(&round.hole_results, TeamSide::One),
    }
}
