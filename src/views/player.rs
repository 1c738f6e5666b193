//! Player detail pages for dice and golf.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::format_margin;
use crate::calculate::{
    player_par_breakdown, recent_contests, recent_form, signed_differential, ParBreakdown,
    RecentForm, WinRecord,
};
use crate::models::{
    Contest, GameId, GameSummary, GolfPlayerStats, GolfRound, GolfRoundSummary, Outcome, Player,
    RoundId, TeamStats,
};

/// One game from a player's (or team's) point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLine {
    pub id: GameId,
    pub played_at: NaiveDateTime,
    pub outcome: Outcome,
    pub own_score: u32,
    pub opponent_score: u32,
    pub teammates: Vec<String>,
    pub opponents: Vec<String>,
    pub location: Option<String>,
}

/// Game line for `player_name`, `None` if they did not play.
pub fn game_line(player_name: &str, game: &GameSummary) -> Option<GameLine> {
    let side = game.side_of(player_name)?;
    let outcome = game.outcome_for(player_name)?;
    Some(GameLine {
        id: game.id,
        played_at: game.played_at,
        outcome,
        own_score: game.score(side),
        opponent_score: game.score(side.opponent()),
        teammates: game
            .roster(side)
            .iter()
            .filter(|n| !n.trim().eq_ignore_ascii_case(player_name.trim()))
            .cloned()
            .collect(),
        opponents: game.roster(side.opponent()).to_vec(),
        location: game.location.clone(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    /// All-time, from backend counters.
    pub win_percentage: u32,
    /// Trailing-N form, recomputed from game history.
    pub recent_form: RecentForm,
    pub avg_win_margin: Option<String>,
    pub avg_loss_margin: Option<String>,
    pub point_differential: String,
    pub recent_games: Vec<GameLine>,
}

pub fn player_view(player: &Player, games: &[GameSummary], recent_count: usize) -> PlayerView {
    let recent_games = recent_contests(&player.name, games, recent_count)
        .into_iter()
        .filter_map(|g| game_line(&player.name, g))
        .collect();

    PlayerView {
        name: player.name.clone(),
        games_played: player.games_played,
        games_won: player.games_won,
        games_lost: player.games_lost(),
        win_percentage: player.win_percentage(),
        recent_form: recent_form(&player.name, games, recent_count),
        avg_win_margin: format_margin(player.avg_win_margin, player.games_won),
        avg_loss_margin: format_margin(player.avg_loss_margin, player.games_lost()),
        point_differential: signed_differential(player.point_differential()),
        recent_games,
    }
}

/// One golf round from a player's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundLine {
    pub id: RoundId,
    pub played_at: NaiveDateTime,
    pub course: Option<String>,
    pub outcome: Outcome,
    pub holes_won: u32,
    pub holes_lost: u32,
    pub halved_holes: u32,
}

pub fn round_line(player_name: &str, round: &GolfRoundSummary) -> Option<RoundLine> {
    let side = round.side_of(player_name)?;
    let outcome = round.outcome_for(player_name)?;
    Some(RoundLine {
        id: round.id,
        played_at: round.played_at,
        course: round.course.clone(),
        outcome,
        holes_won: round.holes_won(side),
        holes_lost: round.holes_won(side.opponent()),
        halved_holes: round.halved_holes,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GolfPlayerView {
    pub name: String,
    pub rounds_played: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub rounds_drawn: u32,
    pub holes_won: u32,
    pub holes_lost: u32,
    pub win_percentage: u32,
    pub recent_form: RecentForm,
    pub recent_rounds: Vec<RoundLine>,
    /// Par split over the detailed rounds supplied; empty without par data.
    pub par_breakdown: ParBreakdown,
}

/// `detailed` holds full rounds (with hole results) for the par split; it
/// may be a subset of `rounds`.
pub fn golf_player_view(
    stats: &GolfPlayerStats,
    rounds: &[GolfRoundSummary],
    detailed: &[GolfRound],
    recent_count: usize,
) -> GolfPlayerView {
    let recent_rounds = recent_contests(&stats.name, rounds, recent_count)
        .into_iter()
        .filter_map(|r| round_line(&stats.name, r))
        .collect();

    GolfPlayerView {
        name: stats.name.clone(),
        rounds_played: stats.golf_rounds_played,
        rounds_won: stats.golf_rounds_won,
        rounds_lost: stats.golf_rounds_lost,
        rounds_drawn: stats.golf_rounds_drawn,
        holes_won: stats.golf_holes_won,
        holes_lost: stats.golf_holes_lost,
        win_percentage: stats.win_percentage(),
        recent_form: recent_form(&stats.name, rounds, recent_count),
        recent_rounds,
        par_breakdown: player_par_breakdown(&stats.name, detailed),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDetailView {
    pub name: String,
    pub members: Vec<String>,
    pub games_played: u32,
    pub games_won: u32,
    pub win_percentage: u32,
    pub avg_win_margin: Option<String>,
    pub avg_loss_margin: Option<String>,
    pub point_differential: String,
    pub recent_games: Vec<GameLine>,
}

/// Team detail; recent games are shown from the first member's side.
pub fn team_detail_view(stats: &TeamStats) -> TeamDetailView {
    let games_lost = stats.games_played.saturating_sub(stats.games_won);
    let anchor = stats.players.first().map(|p| p.name.as_str());
    let recent_games = match anchor {
        Some(name) => stats
            .recent_games
            .iter()
            .filter_map(|g| game_line(name, g))
            .collect(),
        None => Vec::new(),
    };

    TeamDetailView {
        name: stats.team_name.clone(),
        members: stats.players.iter().map(|p| p.name.clone()).collect(),
        games_played: stats.games_played,
        games_won: stats.games_won,
        win_percentage: crate::calculate::normalize_win_percentage(stats.win_percentage),
        avg_win_margin: format_margin(stats.avg_win_margin, stats.games_won),
        avg_loss_margin: format_margin(stats.avg_loss_margin, games_lost),
        point_differential: signed_differential(
            i64::from(stats.total_points_scored) - i64::from(stats.total_points_against),
        ),
        recent_games,
    }
}
