use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::holes::HoleNumber;

/// Unique identifier for a player in a round.
pub type PlayerId = u64;

/// Stroke count for a single hole. An ace is exactly 1.
pub type Strokes = u32;

/// A player on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Strokes added to (or, when negative, removed from) the raw differential.
    #[serde(default)]
    pub handicap: i32,
    /// Hole number to strokes. Absent or zero means unplayed.
    #[serde(default)]
    pub scores: BTreeMap<HoleNumber, Strokes>,
    #[serde(default)]
    pub pays_entry: bool,
    #[serde(default)]
    pub pays_ace: bool,
    #[serde(default)]
    pub is_current_user: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            handicap: 0,
            scores: BTreeMap::new(),
            pays_entry: false,
            pays_ace: false,
            is_current_user: false,
        }
    }

    /// Recorded strokes for `hole`, ignoring zero placeholders.
    pub fn score(&self, hole: HoleNumber) -> Option<Strokes> {
        self.scores.get(&hole).copied().filter(|&s| s > 0)
    }

    pub fn has_score(&self, hole: HoleNumber) -> bool {
        self.score(hole).is_some()
    }

    /// Whether the player threw an ace on any hole.
    pub fn has_ace(&self) -> bool {
        self.scores.values().any(|&s| s == 1)
    }
}
