use serde::{Deserialize, Serialize};

use teepad_core::holes::{HoleLayout, HoleNumber};

/// Where the scoring screen is in the review cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    #[default]
    Scoring,
    HalfwayReview,
    FinalReview,
}

impl Checkpoint {
    /// Holes covered by this checkpoint's review, in play order.
    pub fn holes(&self, layout: &HoleLayout) -> Vec<HoleNumber> {
        let mut order = layout.play_order();
        match self {
            Self::Scoring => Vec::new(),
            Self::HalfwayReview => {
                order.truncate(layout.halfway_count() as usize);
                order
            },
            Self::FinalReview => order,
        }
    }
}

/// What an advance request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Stop for the halfway review; the hole stays put.
    EnterHalfwayReview,
    /// Stop for the final review; the hole stays put.
    EnterFinalReview,
    /// Move the view. `publish` asks for an opportunistic score publish.
    MoveTo { hole: HoleNumber, publish: bool },
    /// The host confirmed the final review.
    ConfirmFinal,
}

/// What a retreat request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Drop back from a review to scoring on the same hole.
    LeaveReview(Checkpoint),
    MoveTo(HoleNumber),
    /// Backing off the first hole leaves for round setup.
    ExitToSetup,
}

/// Checkpoint state machine that interrupts navigation at the halfway and
/// final marks of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewGate {
    checkpoint: Checkpoint,
    halfway_shown: bool,
    halfway_min_holes: u32,
}

impl ReviewGate {
    pub fn new(halfway_min_holes: u32) -> Self {
        Self {
            checkpoint: Checkpoint::Scoring,
            halfway_shown: false,
            halfway_min_holes,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn halfway_shown(&self) -> bool {
        self.halfway_shown
    }

    /// Resolve a forward request from `view_hole` and update the checkpoint.
    pub fn advance(&mut self, view_hole: HoleNumber, layout: &HoleLayout) -> Advance {
        match self.checkpoint {
            Checkpoint::HalfwayReview => {
                self.checkpoint = Checkpoint::Scoring;
                Advance::MoveTo {
                    hole: layout.next(view_hole),
                    publish: false,
                }
            },
            Checkpoint::FinalReview => Advance::ConfirmFinal,
            Checkpoint::Scoring => {
                let played = layout.holes_played(view_hole);
                if !self.halfway_shown
                    && layout.total_holes() >= self.halfway_min_holes
                    && played == layout.halfway_count()
                {
                    self.halfway_shown = true;
                    self.checkpoint = Checkpoint::HalfwayReview;
                    return Advance::EnterHalfwayReview;
                }
                // Re-entered on every advance off the final hole.
                if view_hole == layout.final_hole() {
                    self.checkpoint = Checkpoint::FinalReview;
                    return Advance::EnterFinalReview;
                }
                debug_assert!(played < layout.total_holes());
                Advance::MoveTo {
                    hole: layout.next(view_hole),
                    publish: true,
                }
            },
        }
    }

    /// Resolve a backward request from `view_hole` and update the checkpoint.
    pub fn retreat(&mut self, view_hole: HoleNumber, layout: &HoleLayout) -> Retreat {
        match self.checkpoint {
            Checkpoint::HalfwayReview | Checkpoint::FinalReview => {
                let left = self.checkpoint;
                self.checkpoint = Checkpoint::Scoring;
                Retreat::LeaveReview(left)
            },
            Checkpoint::Scoring if view_hole == layout.starting_hole() => Retreat::ExitToSetup,
            Checkpoint::Scoring => Retreat::MoveTo(layout.prev(view_hole)),
        }
    }
}
