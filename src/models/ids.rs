//! Backend-assigned numeric identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric entity ID assigned by the backend.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Create a new EntityId from a raw backend id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Type alias for player IDs
pub type PlayerId = EntityId;

/// Type alias for dice game IDs
pub type GameId = EntityId;

/// Type alias for golf round IDs
pub type RoundId = EntityId;

/// Type alias for team IDs
pub type TeamId = EntityId;

/// Type alias for golf course IDs
pub type CourseId = EntityId;
