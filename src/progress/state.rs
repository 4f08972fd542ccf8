//! Session state - the single snapshot that gets persisted
//!
//! Everything the game remembers between visits lives here.

use serde::{Deserialize, Serialize};

/// Highest playable level
pub const MAX_LEVEL: u8 = 100;

/// Frontier marker meaning every level has been cleared. Never produced
/// by the reducer (the frontier stops at [`MAX_LEVEL`]) but accepted
/// when restoring older records.
pub const FRONTIER_COMPLETE: u8 = MAX_LEVEL + 1;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Map,
    Game,
    Victory,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Map => "map",
            View::Game => "game",
            View::Victory => "victory",
        }
    }
}

/// Player session: current level, unlock frontier, score and active view.
///
/// Serialized field names match the stored record
/// (`currentLevel`/`unlockedLevel`/`score`/`view`). Missing fields fall
/// back to defaults instead of failing the whole restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    /// Level currently being attempted or displayed
    pub current_level: u8,
    /// Highest level the player may select
    pub unlocked_level: u8,
    /// Cumulative points, never negative
    pub score: u32,
    /// Active screen
    pub view: View,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_level: 1,
            unlocked_level: 1,
            score: 0,
            view: View::Home,
        }
    }
}

impl SessionState {
    /// Clamp a restored record back into range. A partial record like
    /// `{"currentLevel":3}` comes out as the default session because the
    /// current level may never sit past the frontier.
    pub fn sanitized(mut self) -> Self {
        self.unlocked_level = self.unlocked_level.clamp(1, FRONTIER_COMPLETE);
        self.current_level = self
            .current_level
            .clamp(1, self.unlocked_level.min(MAX_LEVEL));
        self
    }

    /// Whether the player may select this level from the map
    pub fn is_level_unlocked(&self, level: u8) -> bool {
        (1..=self.unlocked_level.min(MAX_LEVEL)).contains(&level)
    }

    /// Whether this level is the current unlock frontier
    pub fn is_frontier(&self, level: u8) -> bool {
        level == self.unlocked_level
    }

    /// True once there is anything worth continuing (home screen panel)
    pub fn has_progress(&self) -> bool {
        self.unlocked_level > 1 || self.score > 0
    }
}
