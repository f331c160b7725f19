use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::holes::{HoleLayout, HoleNumber};
use crate::player::{Player, PlayerId};

/// Host-supplied settings for a new round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub total_holes: HoleNumber,
    pub starting_hole: HoleNumber,
    /// Entry fee per opted-in player, in minor currency units.
    pub entry_fee_amount: u64,
    /// Ace-pot fee per opted-in player, in minor currency units.
    pub ace_pot_fee_amount: u64,
    pub use_honor_system: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            total_holes: 18,
            starting_hole: 1,
            entry_fee_amount: 0,
            ace_pot_fee_amount: 0,
            use_honor_system: true,
        }
    }
}

/// A configured round. Everything but `is_finalized` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: Uuid,
    layout: HoleLayout,
    pub entry_fee_amount: u64,
    pub ace_pot_fee_amount: u64,
    pub use_honor_system: bool,
    is_finalized: bool,
}

impl Round {
    pub fn new(config: &RoundConfig) -> Result<Self, ConfigError> {
        let layout = HoleLayout::new(config.total_holes, config.starting_hole)?;
        Ok(Self {
            id: Uuid::new_v4(),
            layout,
            entry_fee_amount: config.entry_fee_amount,
            ace_pot_fee_amount: config.ace_pot_fee_amount,
            use_honor_system: config.use_honor_system,
            is_finalized: false,
        })
    }

    pub fn layout(&self) -> HoleLayout {
        self.layout
    }

    pub fn total_holes(&self) -> HoleNumber {
        self.layout.total_holes()
    }

    pub fn starting_hole(&self) -> HoleNumber {
        self.layout.starting_hole()
    }

    pub fn is_finalized(&self) -> bool {
        self.is_finalized
    }

    /// Close the round. Returns `false` if it was already closed.
    pub fn mark_finalized(&mut self) -> bool {
        if self.is_finalized {
            return false;
        }
        self.is_finalized = true;
        true
    }
}

/// Reject rosters that reuse a player id.
pub fn validate_roster(players: &[Player]) -> Result<(), ConfigError> {
    let mut seen: HashSet<PlayerId> = HashSet::with_capacity(players.len());
    for p in players {
        if !seen.insert(p.id) {
            return Err(ConfigError::DuplicatePlayer(p.id));
        }
    }
    Ok(())
}

/// Invalid round setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoHoles,
    StartingHoleOutOfRange {
        starting_hole: HoleNumber,
        total_holes: HoleNumber,
    },
    DuplicatePlayer(PlayerId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHoles => write!(f, "a round needs at least one hole"),
            Self::StartingHoleOutOfRange {
                starting_hole,
                total_holes,
            } => write!(
                f,
                "starting hole {starting_hole} is outside 1..={total_holes}"
            ),
            Self::DuplicatePlayer(id) => write!(f, "player id {id} appears more than once"),
        }
    }
}

impl std::error::Error for ConfigError {}
