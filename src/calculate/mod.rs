//! Statistics aggregation engine.
//!
//! Pure functions that turn raw lists of players, games and rounds into
//! leaderboard and summary view data:
//! - Win-rate normalization (fraction or percentage input)
//! - Qualification thresholds for ranking eligibility
//! - Ranking with tie grouping
//! - Trailing time and trailing count windows
//! - Rivalry formatting and tallies
//! - Golf par-type breakdowns
//!
//! Nothing here holds state or returns errors. Missing or partial data
//! degrades to `None`/empty results so callers can render "no data".

pub mod par;
pub mod percentage;
pub mod qualification;
pub mod ranking;
pub mod rivalry;
pub mod window;

pub use par::*;
pub use percentage::*;
pub use qualification::*;
pub use ranking::*;
pub use rivalry::*;
pub use window::*;

use crate::models::{GolfPlayerStats, Player, Team};

/// Anything with a games-played count and a (raw, unnormalized) win rate.
pub trait WinRecord {
    /// Name shown on leaderboards.
    fn display_name(&self) -> &str;

    /// Games (or rounds) counted toward qualification.
    fn games_played(&self) -> u32;

    /// Win rate as delivered; may be a fraction or a percentage.
    fn raw_win_rate(&self) -> f64;

    /// Canonical rounded 0-100 percentage.
    fn win_percentage(&self) -> u32 {
        normalize_win_percentage(self.raw_win_rate())
    }
}

impl WinRecord for Player {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn games_played(&self) -> u32 {
        self.games_played
    }

    fn raw_win_rate(&self) -> f64 {
        self.win_percentage
    }
}

impl WinRecord for Team {
    fn display_name(&self) -> &str {
        &self.team_name
    }

    fn games_played(&self) -> u32 {
        self.games_played
    }

    fn raw_win_rate(&self) -> f64 {
        self.win_percentage
    }
}

impl WinRecord for GolfPlayerStats {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn games_played(&self) -> u32 {
        self.golf_rounds_played
    }

    fn raw_win_rate(&self) -> f64 {
        self.golf_win_percentage
    }
}

impl<T: WinRecord + ?Sized> WinRecord for &T {
    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn games_played(&self) -> u32 {
        (**self).games_played()
    }

    fn raw_win_rate(&self) -> f64 {
        (**self).raw_win_rate()
    }
}
