use serde::{Deserialize, Serialize};

use crate::round::ConfigError;

/// 1-based hole number on the course.
pub type HoleNumber = u32;

/// The hole after `hole`, wrapping from the last hole back to 1.
pub fn next_hole(hole: HoleNumber, total: HoleNumber) -> HoleNumber {
    debug_assert!((1..=total).contains(&hole), "hole {hole} outside 1..={total}");
    if hole >= total { 1 } else { hole + 1 }
}

/// The hole before `hole`, wrapping from 1 back to the last hole.
pub fn prev_hole(hole: HoleNumber, total: HoleNumber) -> HoleNumber {
    debug_assert!((1..=total).contains(&hole), "hole {hole} outside 1..={total}");
    if hole <= 1 { total } else { hole - 1 }
}

/// The last hole played in a round that tees off on `starting_hole`.
///
/// This is the hole immediately preceding the start in wrap order, which is
/// not necessarily the highest-numbered hole.
pub fn final_hole(starting_hole: HoleNumber, total: HoleNumber) -> HoleNumber {
    prev_hole(starting_hole, total)
}

/// Every hole in the order it is played: `starting_hole..=total` followed by
/// `1..starting_hole`.
pub fn play_order(starting_hole: HoleNumber, total: HoleNumber) -> Vec<HoleNumber> {
    debug_assert!(
        (1..=total).contains(&starting_hole),
        "starting hole {starting_hole} outside 1..={total}"
    );
    (starting_hole..=total).chain(1..starting_hole).collect()
}

/// Number of holes completed or in progress when standing on `current_hole`.
pub fn holes_played_count(
    current_hole: HoleNumber,
    starting_hole: HoleNumber,
    total: HoleNumber,
) -> u32 {
    if current_hole >= starting_hole {
        current_hole - starting_hole + 1
    } else {
        (total - starting_hole + 1) + current_hole
    }
}

/// A validated `(total_holes, starting_hole)` pair.
///
/// All progress math for a round goes through this type so that shotgun
/// starts on any hole wrap correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleLayout {
    total_holes: HoleNumber,
    starting_hole: HoleNumber,
}

impl HoleLayout {
    pub fn new(total_holes: HoleNumber, starting_hole: HoleNumber) -> Result<Self, ConfigError> {
        if total_holes == 0 {
            return Err(ConfigError::NoHoles);
        }
        if !(1..=total_holes).contains(&starting_hole) {
            return Err(ConfigError::StartingHoleOutOfRange {
                starting_hole,
                total_holes,
            });
        }
        Ok(Self {
            total_holes,
            starting_hole,
        })
    }

    pub fn total_holes(&self) -> HoleNumber {
        self.total_holes
    }

    pub fn starting_hole(&self) -> HoleNumber {
        self.starting_hole
    }

    pub fn next(&self, hole: HoleNumber) -> HoleNumber {
        next_hole(hole, self.total_holes)
    }

    pub fn prev(&self, hole: HoleNumber) -> HoleNumber {
        prev_hole(hole, self.total_holes)
    }

    pub fn final_hole(&self) -> HoleNumber {
        final_hole(self.starting_hole, self.total_holes)
    }

    pub fn play_order(&self) -> Vec<HoleNumber> {
        play_order(self.starting_hole, self.total_holes)
    }

    pub fn holes_played(&self, current_hole: HoleNumber) -> u32 {
        holes_played_count(current_hole, self.starting_hole, self.total_holes)
    }

    /// Holes played at the halfway checkpoint (`floor(total / 2)`).
    pub fn halfway_count(&self) -> u32 {
        self.total_holes / 2
    }

    pub fn contains(&self, hole: HoleNumber) -> bool {
        (1..=self.total_holes).contains(&hole)
    }

    /// Zero-based index of `hole` in the play order.
    pub fn position_of(&self, hole: HoleNumber) -> Option<usize> {
        self.contains(hole)
            .then(|| self.holes_played(hole) as usize - 1)
    }
}
