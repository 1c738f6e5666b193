//! # Tailgate Tracker
//!
//! Score tracking and leaderboard statistics for tailgate dice and golf games.
//!
//! ## Architecture
//!
//! - **models**: Backend payload types (players, games, golf rounds, teams, courses)
//! - **calculate**: Statistics aggregation (normalization, qualification, ranking, windows)
//! - **views**: View models built from a snapshot and an explicit dashboard state
//! - **client**: REST client for the scoreboard backend
//! - **sync**: Snapshot loading and mutate-then-reload operations
//! - **report**: Plain-text rendering for the CLI
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod client;
pub mod config;
pub mod models;
pub mod report;
pub mod sync;
pub mod views;

pub use models::*;

use std::time::Duration;

/// Parse a human-friendly duration string (e.g., "1m", "45s", "10").
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Default to seconds
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    num.checked_mul(multiplier).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_suffixes() {
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_parse_duration_bare_number_is_seconds() {
        assert_eq!(parse_duration(" 10 "), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("-5s"), None);
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert_eq!(parse_duration("99999999999999999h"), None);
        assert_eq!(
            parse_duration("18446744073709551615s"),
            Some(Duration::from_secs(u64::MAX))
        );
    }
}
