//! Shared domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single board game on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Display name; not required to be unique.
    pub name: String,
    /// Smallest supported player count.
    pub min_players: u32,
    /// Largest supported player count.
    pub max_players: u32,
    /// Longest expected playtime in minutes.
    pub max_duration: u32,
    /// Date the game last hit the table.
    pub last_played: NaiveDate,
    /// How often the game has been played in total.
    pub times_played: u32,
}

impl GameRecord {
    /// Whether a group of `player_count` can play this game.
    pub fn supports_players(&self, player_count: u32) -> bool {
        self.min_players <= player_count && player_count <= self.max_players
    }

    /// Whether the game fits in the available time window.
    pub fn fits_within(&self, available_minutes: u32) -> bool {
        self.max_duration <= available_minutes
    }
}

/// Soft preferences applied when weighting eligible games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    /// Boost games that have not been played in a while.
    pub favor_stale: bool,
    /// Boost games that have been played fewer times than their peers.
    pub favor_underplayed: bool,
}

/// A recommended game. Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Name of the suggested game.
    pub name: String,
    /// Longest expected playtime in minutes.
    pub max_duration: u32,
}

impl From<&GameRecord> for Suggestion {
    fn from(record: &GameRecord) -> Self {
        Self {
            name: record.name.clone(),
            max_duration: record.max_duration,
        }
    }
}
