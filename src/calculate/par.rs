//! Golf performance split by hole par.

use serde::Serialize;

use super::rounded_percent;
use crate::models::{GolfHoleResult, GolfRound, TeamSide};

/// Par values that get their own bucket.
pub const PAR_VALUES: [u8; 3] = [3, 4, 5];

/// Hole results for one par value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParBucket {
    pub par: u8,
    pub holes: u32,
    pub won: u32,
    pub lost: u32,
    pub halved: u32,
}

impl ParBucket {
    pub const fn new(par: u8) -> Self {
        Self {
            par,
            holes: 0,
            won: 0,
            lost: 0,
            halved: 0,
        }
    }

    /// `won / (won + lost)`; halved holes do not count. `None` without a
    /// decided hole.
    pub fn win_percentage(&self) -> Option<u32> {
        rounded_percent(self.won, self.won + self.lost)
    }

    pub const fn has_data(&self) -> bool {
        self.holes > 0
    }

    fn record(&mut self, winner: Option<TeamSide>, perspective: TeamSide) {
        self.holes += 1;
        match winner {
            Some(side) if side == perspective => self.won += 1,
            Some(_) => self.lost += 1,
            None => self.halved += 1,
        }
    }
}

/// Par-3, par-4 and par-5 buckets, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParBreakdown {
    pub buckets: [ParBucket; 3],
}

impl Default for ParBreakdown {
    fn default() -> Self {
        Self {
            buckets: PAR_VALUES.map(ParBucket::new),
        }
    }
}

impl ParBreakdown {
    pub fn get(&self, par: u8) -> Option<&ParBucket> {
        self.buckets.iter().find(|b| b.par == par)
    }

    /// No hole in any bucket had par data.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| !b.has_data())
    }

    fn add_holes<'a, I>(&mut self, holes: I, perspective: TeamSide)
    where
        I: IntoIterator<Item = &'a GolfHoleResult>,
    {
        for hole in holes {
            let Some(par) = hole.par else { continue };
            if let Some(bucket) = self.buckets.iter_mut().find(|b| b.par == par) {
                bucket.record(hole.winner_team, perspective);
            }
        }
    }
}

/// Bucket one round's holes by par, counting wins for `perspective`.
///
/// Holes without par data, or with a par outside 3-5, are skipped.
pub fn par_breakdown(holes: &[GolfHoleResult], perspective: TeamSide) -> ParBreakdown {
    let mut breakdown = ParBreakdown::default();
    breakdown.add_holes(holes, perspective);
    breakdown
}

/// A player's par breakdown across rounds.
///
/// Hole winners are team-relative, so each round first resolves the side
/// the player was on. Rounds the player did not play are skipped.
pub fn player_par_breakdown(player_name: &str, rounds: &[GolfRound]) -> ParBreakdown {
    let mut breakdown = ParBreakdown::default();
    for round in rounds {
        if let Some(side) = round.side_of(player_name) {
            breakdown.add_holes(&round.hole_results, side);
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerId, RoundId};
    use chrono::NaiveDate;

    const PARS: [u8; 18] = [4, 4, 3, 5, 4, 3, 4, 5, 4, 4, 3, 4, 5, 4, 3, 4, 5, 4];

    fn holes(winners: &[Option<TeamSide>]) -> Vec<GolfHoleResult> {
        (0..18)
            .map(|i| {
                GolfHoleResult::new(i as u8 + 1, winners[i % winners.len()]).with_par(PARS[i])
            })
            .collect()
    }

    fn player(id: i64, name: &str) -> Player {
        Player {
            id: PlayerId::new(id),
            name: name.to_string(),
            created_at: None,
            games_played: 0,
            games_won: 0,
            total_points_scored: 0,
            total_points_against: 0,
            win_percentage: 0.0,
            avg_win_margin: 0.0,
            avg_loss_margin: 0.0,
        }
    }

    fn round(
        id: i64,
        team1: [&str; 2],
        team2: [&str; 2],
        hole_results: Vec<GolfHoleResult>,
    ) -> GolfRound {
        let tally = crate::models::RoundTally::from_holes(&hole_results);
        GolfRound {
            id: RoundId::new(id),
            course: None,
            played_at: NaiveDate::from_ymd_opt(2025, 8, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            team1_holes_won: tally.team1_holes_won,
            team2_holes_won: tally.team2_holes_won,
            halved_holes: tally.halved_holes,
            winner_team: tally.winner_team,
            team1_players: vec![player(1, team1[0]), player(2, team1[1])],
            team2_players: vec![player(3, team2[0]), player(4, team2[1])],
            hole_results,
            course_id: None,
            tee: None,
        }
    }

    #[test]
    fn test_par_breakdown_counts_per_bucket() {
        // Par 3 holes: 3, 6, 11, 15. Team 1 wins 3 and 11, halves 15, loses 6.
        let mut results = holes(&[None]);
        results[2].winner_team = Some(TeamSide::One);
        results[5].winner_team = Some(TeamSide::Two);
        results[10].winner_team = Some(TeamSide::One);

        let breakdown = par_breakdown(&results, TeamSide::One);
        let par3 = breakdown.get(3).unwrap();
        assert_eq!(par3.holes, 4);
        assert_eq!((par3.won, par3.lost, par3.halved), (2, 1, 1));
        assert_eq!(par3.win_percentage(), Some(67));

        let par4 = breakdown.get(4).unwrap();
        assert_eq!(par4.holes, 10);
        assert_eq!(par4.win_percentage(), None);

        let team2 = par_breakdown(&results, TeamSide::Two);
        assert_eq!(team2.get(3).unwrap().win_percentage(), Some(33));
    }

    #[test]
    fn test_par_breakdown_is_idempotent() {
        let results = holes(&[
            Some(TeamSide::One),
            Some(TeamSide::Two),
            None,
            Some(TeamSide::One),
        ]);
        let first = par_breakdown(&results, TeamSide::One);
        let second = par_breakdown(&results, TeamSide::One);
        assert_eq!(first, second);
    }

    #[test]
    fn test_par_breakdown_skips_missing_par() {
        let results: Vec<GolfHoleResult> = (1..=18)
            .map(|n| GolfHoleResult::new(n, Some(TeamSide::One)))
            .collect();
        let breakdown = par_breakdown(&results, TeamSide::One);

        assert!(breakdown.is_empty());
        assert!(breakdown.buckets.iter().all(|b| b.win_percentage().is_none()));
    }

    #[test]
    fn test_par_breakdown_ignores_unusual_par() {
        let results = vec![
            GolfHoleResult::new(1, Some(TeamSide::One)).with_par(6),
            GolfHoleResult::new(2, Some(TeamSide::One)).with_par(5),
        ];
        let breakdown = par_breakdown(&results, TeamSide::One);
        assert_eq!(breakdown.get(5).unwrap().won, 1);
        assert!(breakdown.get(6).is_none());
    }

    #[test]
    fn test_player_breakdown_resolves_side_per_round() {
        let all_team1 = holes(&[Some(TeamSide::One)]);
        // Sean plays team 1 in round 1 and team 2 in round 2: every hole of
        // round 1 is a win and every hole of round 2 a loss.
        let rounds = vec![
            round(1, ["Sean", "Tyler"], ["AJ", "Danny"], all_team1.clone()),
            round(2, ["AJ", "Danny"], ["Sean", "Tyler"], all_team1.clone()),
            round(3, ["AJ", "Danny"], ["Reid", "Colin"], all_team1),
        ];

        let breakdown = player_par_breakdown("sean", &rounds);
        let par4 = breakdown.get(4).unwrap();
        assert_eq!(par4.holes, 20);
        assert_eq!(par4.won, 10);
        assert_eq!(par4.lost, 10);
        assert_eq!(par4.win_percentage(), Some(50));

        let aj = player_par_breakdown("AJ", &rounds);
        assert_eq!(aj.get(5).unwrap().won, 8);
        assert_eq!(aj.get(5).unwrap().lost, 4);
    }

    #[test]
    fn test_player_breakdown_trims_roster_names() {
        let rounds = vec![round(
            1,
            ["Sean ", "Tyler"],
            ["AJ", "Danny"],
            holes(&[Some(TeamSide::One)]),
        )];

        let breakdown = player_par_breakdown(" sean", &rounds);
        assert_eq!(breakdown.get(3).unwrap().won, 4);
        assert_eq!(rounds[0].side_of("Sean"), Some(TeamSide::One));
    }

    #[test]
    fn test_player_breakdown_no_rounds() {
        let breakdown = player_par_breakdown("Nobody", &[]);
        assert!(breakdown.is_empty());
    }
}
