//! Client-side validation of create/update payloads.
//!
//! Payloads are checked before any request is sent so that obvious mistakes
//! never reach the backend. Anything the backend rejects anyway is surfaced
//! verbatim by the client.

use std::collections::HashSet;

use thiserror::Error;

use super::{PlayerId, TeamSide};

/// Maximum length of a player name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a game location.
pub const MAX_LOCATION_LEN: usize = 100;

/// Validation failures for create/update payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Player name is {len} characters (max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("{side} needs exactly {expected} players, got {actual}")]
    RosterSize {
        side: TeamSide,
        expected: usize,
        actual: usize,
    },

    #[error("Player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),

    #[error("Players cannot be on both teams (player {0})")]
    PlayerOnBothTeams(PlayerId),

    #[error("Location is {len} characters (max {max})")]
    LocationTooLong { len: usize, max: usize },

    #[error("A round needs exactly {expected} hole results, got {actual}")]
    HoleCount { expected: usize, actual: usize },

    #[error("Hole number {0} is outside 1..=18")]
    HoleOutOfRange(u8),

    #[error("Hole {0} is listed more than once")]
    DuplicateHole(u8),

    #[error("Update contains no changes")]
    EmptyUpdate,
}

/// Check a trimmed player name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyName);
    }
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Check an optional location string.
pub fn validate_location(location: Option<&str>) -> Result<(), ValidationError> {
    if let Some(location) = location {
        let len = location.chars().count();
        if len > MAX_LOCATION_LEN {
            return Err(ValidationError::LocationTooLong {
                len,
                max: MAX_LOCATION_LEN,
            });
        }
    }
    Ok(())
}

/// Check two rosters for size and overlap.
pub fn validate_rosters(
    team1: &[PlayerId],
    team2: &[PlayerId],
    roster_size: usize,
) -> Result<(), ValidationError> {
    for (side, roster) in [(TeamSide::One, team1), (TeamSide::Two, team2)] {
        if roster.len() != roster_size {
            return Err(ValidationError::RosterSize {
                side,
                expected: roster_size,
                actual: roster.len(),
            });
        }
    }

    let mut seen_team1 = HashSet::new();
    for id in team1 {
        if !seen_team1.insert(*id) {
            return Err(ValidationError::DuplicatePlayer(*id));
        }
    }

    let mut seen_team2 = HashSet::new();
    for id in team2 {
        if seen_team1.contains(id) {
            return Err(ValidationError::PlayerOnBothTeams(*id));
        }
        if !seen_team2.insert(*id) {
            return Err(ValidationError::DuplicatePlayer(*id));
        }
    }

    Ok(())
}
