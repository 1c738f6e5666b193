//! Plain-text rendering of view models for terminal output.

use std::fmt::Write;

use crate::calculate::{format_percent, ParBreakdown, RecentForm};
use crate::models::{CourseSearchResult, Outcome};
use crate::views::{
    DashboardView, GameLine, GolfPlayerView, LeaderboardRow, PlayerView, RivalryPage,
    RivalrySource, RoundLine, RoundView, TeamDetailView, TeamsView,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn outcome_letter(outcome: Outcome) -> char {
    match outcome {
        Outcome::Win => 'W',
        Outcome::Loss => 'L',
        Outcome::Draw => 'D',
    }
}

fn push_leaderboard(out: &mut String, rows: &[LeaderboardRow]) {
    for row in rows {
        let medal = row.medal.map(|m| format!(" ({m})")).unwrap_or_default();
        let tie = if row.tied { " =" } else { "" };
        let _ = writeln!(
            out,
            "{:>3}. {:<28} {:>4}%  {:>3} played{tie}{medal}",
            row.position, row.name, row.win_percentage, row.games_played
        );
    }
}

fn push_form(out: &mut String, form: &RecentForm) {
    if form.is_empty() {
        let _ = writeln!(out, "Last {}:          no games", form.limit);
    } else {
        let _ = writeln!(
            out,
            "Last {}:          {} ({}-{}-{})",
            form.limit,
            format_percent(form.win_percentage()),
            form.wins,
            form.losses,
            form.draws
        );
    }
}

fn push_par(out: &mut String, breakdown: &ParBreakdown) {
    if breakdown.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nBy par:");
    for bucket in breakdown.buckets.iter().filter(|b| b.has_data()) {
        let _ = writeln!(
            out,
            "  Par {}: {:>4}  won {} lost {} halved {}",
            bucket.par,
            format_percent(bucket.win_percentage()),
            bucket.won,
            bucket.lost,
            bucket.halved
        );
    }
}

fn push_game_line(out: &mut String, line: &GameLine) {
    let _ = writeln!(
        out,
        "  {} {} {}-{}  with {} vs {}{}",
        line.played_at.format(TIMESTAMP_FORMAT),
        outcome_letter(line.outcome),
        line.own_score,
        line.opponent_score,
        line.teammates.join(", "),
        line.opponents.join(", "),
        line.location
            .as_deref()
            .map(|l| format!(" @ {l}"))
            .unwrap_or_default()
    );
}

fn push_round_line(out: &mut String, line: &RoundLine) {
    let _ = writeln!(
        out,
        "  {} {} {}-{} ({} halved)  {}",
        line.played_at.format(TIMESTAMP_FORMAT),
        outcome_letter(line.outcome),
        line.holes_won,
        line.holes_lost,
        line.halved_holes,
        line.course.as_deref().unwrap_or("Unknown course")
    );
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let season = view
        .state
        .season
        .map_or_else(|| "all time".to_string(), |y| y.to_string());
    let _ = writeln!(out, "=== {} dashboard ({season}) ===", view.state.sport);
    let _ = writeln!(
        out,
        "Total: {}   Qualifying: {} games ({}% of total)",
        view.total_games, view.min_games_required, view.threshold_percent
    );

    if view.is_insufficient() {
        let _ = writeln!(out, "\nNot enough data for a leaderboard yet.");
    } else {
        let _ = writeln!(
            out,
            "\nTop winner: {} ({})",
            view.top_winners.join(", "),
            format_percent(view.top_win_percentage)
        );
        let _ = writeln!(out, "\nLeaderboard:");
        push_leaderboard(&mut out, &view.leaderboard);
    }

    let _ = writeln!(out, "\nLast {} days:", view.window_days);
    if view.recent.is_empty() {
        let _ = writeln!(out, "  no games played");
    } else {
        let _ = writeln!(out, "  Played:         {}", view.recent.total);
        let _ = writeln!(out, "  Players:        {}", view.recent.distinct_players);
        if let Some(avg) = view.recent.average_combined_score {
            let _ = writeln!(out, "  Avg combined:   {avg}");
        }
    }
    out
}

pub fn render_player(view: &PlayerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", view.name);
    let _ = writeln!(
        out,
        "Record:           {}-{} in {} games",
        view.games_won, view.games_lost, view.games_played
    );
    let _ = writeln!(out, "All-time:         {}%", view.win_percentage);
    push_form(&mut out, &view.recent_form);
    let _ = writeln!(
        out,
        "Avg win margin:   {}",
        view.avg_win_margin.as_deref().unwrap_or("--")
    );
    let _ = writeln!(
        out,
        "Avg loss margin:  {}",
        view.avg_loss_margin.as_deref().unwrap_or("--")
    );
    let _ = writeln!(out, "Point diff:       {}", view.point_differential);

    if !view.recent_games.is_empty() {
        let _ = writeln!(out, "\nRecent games:");
        for line in &view.recent_games {
            push_game_line(&mut out, line);
        }
    }
    out
}

pub fn render_golf_player(view: &GolfPlayerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} (golf) ===", view.name);
    let _ = writeln!(
        out,
        "Rounds:           {}-{}-{} in {}",
        view.rounds_won, view.rounds_lost, view.rounds_drawn, view.rounds_played
    );
    let _ = writeln!(
        out,
        "Holes:            {} won, {} lost",
        view.holes_won, view.holes_lost
    );
    let _ = writeln!(out, "Win rate:         {}%", view.win_percentage);
    push_form(&mut out, &view.recent_form);
    push_par(&mut out, &view.par_breakdown);

    if !view.recent_rounds.is_empty() {
        let _ = writeln!(out, "\nRecent rounds:");
        for line in &view.recent_rounds {
            push_round_line(&mut out, line);
        }
    }
    out
}

pub fn render_round(view: &RoundView) -> String {
    let mut out = String::new();
    let course = view.course.as_deref().unwrap_or("Unknown course");
    let _ = writeln!(out, "=== Round {} at {course} ===", view.id);
    if let Some(tee) = &view.tee_name {
        let _ = writeln!(out, "Tee: {tee}");
    }
    let _ = writeln!(out, "Played: {}", view.played_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "Team 1: {}", view.team1.join(", "));
    let _ = writeln!(out, "Team 2: {}", view.team2.join(", "));
    let _ = writeln!(out, "\n{}", view.result_label());
    if !view.is_complete() {
        let _ = writeln!(out, "(incomplete: {} of 18 holes)", view.holes.len());
    }

    if !view.holes.is_empty() {
        let _ = writeln!(out, "\nHole  Par  Yards  Winner");
        for hole in &view.holes {
            let par = hole.par.map_or_else(|| "-".to_string(), |p| p.to_string());
            let yards = hole
                .yardage
                .map_or_else(|| "-".to_string(), |y| y.to_string());
            let winner = hole
                .winner
                .map_or_else(|| "halved".to_string(), |s| s.to_string());
            let _ = writeln!(out, "{:>4}  {par:>3}  {yards:>5}  {winner}", hole.hole_number);
        }
    }
    push_par(&mut out, &view.par_breakdown);
    out
}

pub fn render_rivalry(page: &RivalryPage) -> String {
    let mut out = String::new();
    let s = &page.summary;
    let source = match page.source {
        RivalrySource::Backend => "",
        RivalrySource::Tally => " (local tally)",
    };
    let _ = writeln!(out, "=== {} vs {}{source} ===", s.first_name, s.second_name);
    if s.is_empty() {
        let _ = writeln!(out, "No rivalry games yet.");
        return out;
    }
    let _ = writeln!(out, "Games:  {}", s.total_games);
    let _ = writeln!(
        out,
        "{:<20} {:>3} wins ({}%)  {} pts",
        s.first_name, s.first_wins, s.first_win_percentage, s.first_points
    );
    let _ = writeln!(
        out,
        "{:<20} {:>3} wins ({}%)  {} pts",
        s.second_name, s.second_wins, s.second_win_percentage, s.second_points
    );
    let _ = writeln!(out, "Leader: {} ({})", s.leader, s.differential_label);

    if !page.recent.is_empty() {
        let _ = writeln!(out, "\nRecent:");
        for game in &page.recent {
            let _ = writeln!(
                out,
                "  {} {:<6} {}  {}",
                game.played_at.format(TIMESTAMP_FORMAT),
                game.score,
                game.winner,
                game.location.as_deref().unwrap_or("")
            );
        }
    }
    out
}

pub fn render_teams(view: &TeamsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Teams ===");
    let _ = writeln!(
        out,
        "Total games: {}   Qualifying: {} games ({}% of total)",
        view.total_games, view.min_games_required, view.threshold_percent
    );
    if view.is_insufficient() {
        let _ = writeln!(out, "\nNot enough data for a leaderboard yet.");
    } else {
        out.push('\n');
        push_leaderboard(&mut out, &view.leaderboard);
    }
    out
}

pub fn render_team_detail(view: &TeamDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", view.name);
    let _ = writeln!(out, "Members:          {}", view.members.join(", "));
    let _ = writeln!(
        out,
        "Record:           {} won of {} ({}%)",
        view.games_won, view.games_played, view.win_percentage
    );
    let _ = writeln!(
        out,
        "Avg margins:      +{} / -{}",
        view.avg_win_margin.as_deref().unwrap_or("--"),
        view.avg_loss_margin.as_deref().unwrap_or("--")
    );
    let _ = writeln!(out, "Point diff:       {}", view.point_differential);
    for line in &view.recent_games {
        push_game_line(&mut out, line);
    }
    out
}

pub fn render_courses(results: &[CourseSearchResult]) -> String {
    let mut out = String::new();
    if results.is_empty() {
        let _ = writeln!(out, "No courses found.");
        return out;
    }
    for course in results {
        let place = course
            .location
            .as_ref()
            .map(|l| {
                [l.city.as_deref(), l.state.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|p| !p.is_empty())
            .map(|p| format!("  ({p})"))
            .unwrap_or_default();
        let _ = writeln!(out, "{:>6}  {}{place}", course.id.get(), course.display_name());
    }
    out
}
