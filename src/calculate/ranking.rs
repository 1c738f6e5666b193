//! Win-rate ranking with tie handling.
//!
//! Two views of the same ordering:
//! - [`group_ties`] puts entries with the same rounded percentage in one
//!   group sharing a rank, so "top winner" style highlights reach everyone
//!   at that value.
//! - [`leaderboard`] numbers entries by list position. Ties keep input
//!   order, and medals follow position, not value: two players tied for
//!   second still get silver and bronze respectively.

use serde::Serialize;

use super::WinRecord;

/// Podium treatment for the first three leaderboard positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a zero-based list index.
    pub const fn for_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

impl std::fmt::Display for Medal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Medal::Gold => write!(f, "gold"),
            Medal::Silver => write!(f, "silver"),
            Medal::Bronze => write!(f, "bronze"),
        }
    }
}

/// One numbered leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry<'a, T> {
    /// 1-based list position.
    pub position: usize,
    pub medal: Option<Medal>,
    /// Normalized 0-100 win percentage.
    pub win_percentage: u32,
    /// Another entry in the full ranking shares this percentage.
    pub tied: bool,
    pub entry: &'a T,
}

/// Entries sharing one rounded win percentage.
#[derive(Debug, Clone, Serialize)]
pub struct TieGroup<'a, T> {
    /// Competition rank: 1 + number of entries ranked strictly above.
    pub rank: usize,
    pub win_percentage: u32,
    pub members: Vec<&'a T>,
}

impl<T> TieGroup<'_, T> {
    pub fn is_tie(&self) -> bool {
        self.members.len() > 1
    }
}

/// Stable sort by normalized win percentage, highest first.
pub fn sort_by_win_percentage<'a, T, I>(entries: I) -> Vec<(u32, &'a T)>
where
    T: WinRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut scored: Vec<(u32, &T)> = entries
        .into_iter()
        .map(|e| (e.win_percentage(), e))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
}

/// Group entries with equal normalized percentages.
pub fn group_ties<'a, T, I>(entries: I) -> Vec<TieGroup<'a, T>>
where
    T: WinRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut groups: Vec<TieGroup<'a, T>> = Vec::new();
    let mut ranked_above = 0;

    for (pct, entry) in sort_by_win_percentage(entries) {
        if let Some(group) = groups.last_mut().filter(|g| g.win_percentage == pct) {
            group.members.push(entry);
            continue;
        }
        if let Some(previous) = groups.last() {
            ranked_above += previous.members.len();
        }
        groups.push(TieGroup {
            rank: ranked_above + 1,
            win_percentage: pct,
            members: vec![entry],
        });
    }

    groups
}

/// Every entry at the highest normalized percentage.
pub fn top_winners<'a, T, I>(entries: I) -> Vec<&'a T>
where
    T: WinRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    group_ties(entries)
        .into_iter()
        .next()
        .map(|group| group.members)
        .unwrap_or_default()
}

/// Numbered top-`limit` list; `None` keeps every entry.
pub fn leaderboard<'a, T, I>(entries: I, limit: Option<usize>) -> Vec<RankedEntry<'a, T>>
where
    T: WinRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let sorted = sort_by_win_percentage(entries);
    let tied_at = |pct: u32| sorted.iter().filter(|(p, _)| *p == pct).count() > 1;

    sorted
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(index, (pct, entry))| RankedEntry {
            position: index + 1,
            medal: Medal::for_index(index),
            win_percentage: *pct,
            tied: tied_at(*pct),
            entry: *entry,
        })
        .collect()
}
