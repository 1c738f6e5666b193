//! Rivalry display formatting and the optional client-side tally.

use serde::{Deserialize, Serialize};

use super::{normalize_win_percentage, percent_of};
use crate::models::{
    Contest, GameSummary, RivalryGame, RivalryStats, TeamSide, DICE_ROSTER_SIZE,
};

/// One side of the rivalry: a display name and its member roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Faction {
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn contains(&self, player_name: &str) -> bool {
        let player_name = player_name.trim();
        self.members
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(player_name))
    }

    /// A full dice roster made up only of this faction's members.
    pub fn owns(&self, roster: &[String]) -> bool {
        roster.len() == DICE_ROSTER_SIZE && roster.iter().all(|name| self.contains(name))
    }
}

/// Display-ready rivalry aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RivalryView {
    pub first_name: String,
    pub second_name: String,
    pub total_games: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    pub first_win_percentage: u32,
    pub second_win_percentage: u32,
    pub first_points: u32,
    pub second_points: u32,
    pub point_differential: i64,
    /// Signed differential: "+18", "-4" or "0".
    pub differential_label: String,
    /// Faction shown as winning; the first faction when the differential is zero.
    pub leader: String,
}

impl RivalryView {
    pub const fn is_empty(&self) -> bool {
        self.total_games == 0
    }
}

/// Render a point differential with an explicit sign.
pub fn signed_differential(diff: i64) -> String {
    if diff > 0 {
        format!("+{diff}")
    } else {
        diff.to_string()
    }
}

/// Format a backend rivalry aggregate. No partitioning happens here.
pub fn rivalry_view(stats: &RivalryStats, first_name: &str, second_name: &str) -> RivalryView {
    let leader = if stats.point_differential >= 0 {
        first_name
    } else {
        second_name
    };

    RivalryView {
        first_name: first_name.to_string(),
        second_name: second_name.to_string(),
        total_games: stats.total_games,
        first_wins: stats.first_wins,
        second_wins: stats.second_wins,
        first_win_percentage: normalize_win_percentage(stats.first_win_percentage),
        second_win_percentage: normalize_win_percentage(stats.second_win_percentage),
        first_points: stats.first_points,
        second_points: stats.second_points,
        point_differential: stats.point_differential,
        differential_label: signed_differential(stats.point_differential),
        leader: leader.to_string(),
    }
}

/// Which game side each faction occupied, if this is a rivalry game.
fn faction_sides(game: &GameSummary, first: &Faction, second: &Faction) -> Option<TeamSide> {
    let team1 = &game.team1_player_names;
    let team2 = &game.team2_player_names;
    if first.owns(team1) && second.owns(team2) {
        Some(TeamSide::One)
    } else if first.owns(team2) && second.owns(team1) {
        Some(TeamSide::Two)
    } else {
        None
    }
}

/// Recompute the rivalry aggregate from game summaries.
///
/// A game counts when one roster is made up entirely of `first` members and
/// the other entirely of `second` members. `recent_games` holds the
/// `recent_limit` newest rivalry games.
pub fn tally_rivalry(
    games: &[GameSummary],
    first: &Faction,
    second: &Faction,
    recent_limit: usize,
) -> RivalryStats {
    let mut stats = RivalryStats::empty();
    let mut rivalry_games: Vec<RivalryGame> = Vec::new();

    for game in games {
        let Some(first_side) = faction_sides(game, first, second) else {
            continue;
        };
        let second_side = first_side.opponent();
        let first_score = game.score(first_side);
        let second_score = game.score(second_side);
        let first_won = game.winner_team == first_side;

        stats.total_games += 1;
        if first_won {
            stats.first_wins += 1;
        } else {
            stats.second_wins += 1;
        }
        stats.first_points += first_score;
        stats.second_points += second_score;

        rivalry_games.push(RivalryGame {
            id: game.id,
            played_at: game.played_at,
            location: game.location.clone(),
            first_players: game.roster(first_side).to_vec(),
            second_players: game.roster(second_side).to_vec(),
            first_score,
            second_score,
            winner: if first_won {
                first.name.clone()
            } else {
                second.name.clone()
            },
        });
    }

    // Stored as 0-1 fractions.
    stats.first_win_percentage =
        percent_of(stats.first_wins, stats.total_games).map_or(0.0, |p| p / 100.0);
    stats.second_win_percentage =
        percent_of(stats.second_wins, stats.total_games).map_or(0.0, |p| p / 100.0);
    stats.point_differential = i64::from(stats.first_points) - i64::from(stats.second_points);

    rivalry_games.sort_by(|a, b| b.played_at.cmp(&a.played_at));
    rivalry_games.truncate(recent_limit);
    stats.recent_games = rivalry_games;

    stats
}
