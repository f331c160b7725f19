use serde::{Deserialize, Serialize};

use teepad_core::holes::{HoleLayout, HoleNumber};
use teepad_core::honor::honor_order;
use teepad_core::ledger::{MissingScore, RangeTotal, ScoreError, ScoreLedger, Standing};
use teepad_core::player::{Player, PlayerId, Strokes};
use teepad_core::pot::{PotWinners, Pots};
use teepad_core::round::{ConfigError, Round, RoundConfig};

use crate::collaborator::{ExternalTarget, RoundCollaborator, ScoreSnapshot};
use crate::config::{CompletenessPolicy, EngineConfig};
use crate::error::NavigationError;
use crate::finalizer::{self, FinalizeOutcome};
use crate::review::{Advance, Checkpoint, Retreat, ReviewGate};

/// What the scoring screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub view_hole: HoleNumber,
    pub checkpoint: Checkpoint,
}

/// Non-blocking notification raised while navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Players without a score on the hole being left.
    IncompleteHole {
        hole: HoleNumber,
        missing: Vec<PlayerId>,
    },
    /// Gaps in the review being confirmed.
    IncompleteReview {
        checkpoint: Checkpoint,
        missing: Vec<MissingScore>,
    },
    /// The opportunistic publish on a forward move failed.
    PublishFailed(String),
}

/// Navigation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Moved { from: HoleNumber, to: HoleNumber },
    EnteredReview(Checkpoint),
    LeftReview(Checkpoint),
    ExitedToSetup,
    Finalized(FinalizeOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub notices: Vec<Notice>,
}

/// A live scoring session for one round on the authoritative device.
///
/// Owns the round, the card and the view; every query (honor order,
/// standings, pots) is recomputed from them on demand.
pub struct ScoringSession<C> {
    round: Round,
    ledger: ScoreLedger,
    view_hole: HoleNumber,
    gate: ReviewGate,
    config: EngineConfig,
    collaborator: C,
}

impl<C: RoundCollaborator> ScoringSession<C> {
    pub fn new(
        round_config: &RoundConfig,
        players: Vec<Player>,
        config: EngineConfig,
        collaborator: C,
    ) -> Result<Self, ConfigError> {
        let round = Round::new(round_config)?;
        Self::resume(round, players, config, collaborator)
    }

    /// Start a session for an existing round, at its starting hole.
    pub fn resume(
        round: Round,
        players: Vec<Player>,
        config: EngineConfig,
        collaborator: C,
    ) -> Result<Self, ConfigError> {
        let mut ledger = ScoreLedger::new(round.layout(), players)?;
        if round.is_finalized() {
            ledger.freeze();
        }
        tracing::info!(
            round = %round.id,
            holes = round.total_holes(),
            starting_hole = round.starting_hole(),
            players = ledger.players().len(),
            "scoring session started"
        );
        Ok(Self {
            view_hole: round.starting_hole(),
            gate: ReviewGate::new(config.halfway_min_holes),
            round,
            ledger,
            config,
            collaborator,
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn players(&self) -> &[Player] {
        self.ledger.players()
    }

    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// Tear the session down, handing back the collaborator.
    pub fn into_collaborator(self) -> C {
        self.collaborator
    }

    fn layout(&self) -> HoleLayout {
        self.round.layout()
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            view_hole: self.view_hole,
            checkpoint: self.gate.checkpoint(),
        }
    }

    pub fn view_hole(&self) -> HoleNumber {
        self.view_hole
    }

    pub fn holes_played(&self) -> u32 {
        self.layout().holes_played(self.view_hole)
    }

    pub fn set_score(
        &mut self,
        player_id: PlayerId,
        hole: HoleNumber,
        strokes: Strokes,
    ) -> Result<(), ScoreError> {
        self.ledger.set_score(player_id, hole, strokes)
    }

    /// Score `player_id` on the hole currently in view.
    pub fn score_current(&mut self, player_id: PlayerId, strokes: Strokes) -> Result<(), ScoreError> {
        self.ledger.set_score(player_id, self.view_hole, strokes)
    }

    pub fn clear_score(&mut self, player_id: PlayerId, hole: HoleNumber) -> Result<(), ScoreError> {
        self.ledger.clear_score(player_id, hole)
    }

    pub fn is_hole_complete(&self, hole: HoleNumber) -> bool {
        self.ledger.is_hole_complete(hole)
    }

    /// Tee order for the hole in view.
    pub fn honor_order(&self) -> Vec<&Player> {
        honor_order(
            self.ledger.players(),
            self.view_hole,
            self.round.starting_hole(),
            self.round.use_honor_system,
            &self.layout().play_order(),
        )
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.ledger.standings(None)
    }

    /// Leaderboard restricted to the holes covered by `checkpoint`'s review.
    pub fn review_standings(&self, checkpoint: Checkpoint) -> Vec<Standing> {
        let holes = checkpoint.holes(&self.layout());
        self.ledger.standings(Some(&|h: HoleNumber| holes.contains(&h)))
    }

    pub fn player_total(&self, player_id: PlayerId) -> Option<RangeTotal> {
        self.ledger.total(player_id, None)
    }

    pub fn pots(&self) -> Pots {
        Pots::calculate(
            self.ledger.players(),
            self.round.entry_fee_amount,
            self.round.ace_pot_fee_amount,
        )
    }

    pub fn pot_winners(&self) -> PotWinners {
        PotWinners::determine(self.ledger.players())
    }

    /// Holes in the active review, empty while scoring.
    pub fn review_holes(&self) -> Vec<HoleNumber> {
        self.gate.checkpoint().holes(&self.layout())
    }

    /// Whether every hole of the active review is scored for every player.
    pub fn review_complete(&self) -> bool {
        self.ledger.missing(&self.review_holes()).is_empty()
    }

    /// Move forward, honouring the completeness policy.
    pub async fn advance(&mut self) -> Result<StepOutcome, NavigationError> {
        self.advance_inner(false).await
    }

    /// Move forward past missing scores regardless of policy.
    pub async fn force_advance(&mut self) -> Result<StepOutcome, NavigationError> {
        self.advance_inner(true).await
    }

    async fn advance_inner(&mut self, force: bool) -> Result<StepOutcome, NavigationError> {
        if self.round.is_finalized() {
            // Confirming a closed round again is a harmless no-op.
            if self.gate.checkpoint() == Checkpoint::FinalReview {
                return Ok(StepOutcome {
                    step: Step::Finalized(FinalizeOutcome::AlreadyFinalized),
                    notices: Vec::new(),
                });
            }
            return Err(NavigationError::RoundFinalized);
        }

        let mut notices = Vec::new();
        if let Some((notice, missing)) = self.completeness_notice() {
            if self.config.completeness == CompletenessPolicy::Block && !force {
                tracing::info!(hole = self.view_hole, missing = missing.len(), "advance blocked");
                return Err(NavigationError::Blocked { missing });
            }
            tracing::warn!(hole = self.view_hole, missing = missing.len(), "advancing with missing scores");
            notices.push(notice);
        }

        let from = self.view_hole;
        let layout = self.layout();
        let step = match self.gate.advance(from, &layout) {
            Advance::EnterHalfwayReview => Step::EnteredReview(Checkpoint::HalfwayReview),
            Advance::EnterFinalReview => Step::EnteredReview(Checkpoint::FinalReview),
            Advance::MoveTo { hole, publish } => {
                self.view_hole = hole;
                if publish && self.config.publish_on_advance {
                    let snapshot = ScoreSnapshot::capture(&self.round, &self.ledger);
                    if let Err(e) = self.collaborator.publish_scores(&snapshot).await {
                        tracing::warn!(round = %self.round.id, error = %e, "score publish failed");
                        notices.push(Notice::PublishFailed(e.to_string()));
                    }
                }
                Step::Moved { from, to: hole }
            },
            Advance::ConfirmFinal => {
                let outcome = self.confirm_final().await?;
                return Ok(StepOutcome {
                    step: Step::Finalized(outcome),
                    notices,
                });
            },
        };

        tracing::debug!(?step, view_hole = self.view_hole, "advanced");
        Ok(StepOutcome { step, notices })
    }

    /// Missing scores relevant to the next advance: the hole in view while
    /// scoring, or the whole review set at a checkpoint.
    fn completeness_notice(&self) -> Option<(Notice, Vec<MissingScore>)> {
        let checkpoint = self.gate.checkpoint();
        let holes = match checkpoint {
            Checkpoint::Scoring => vec![self.view_hole],
            _ => checkpoint.holes(&self.layout()),
        };
        let missing = self.ledger.missing(&holes);
        if missing.is_empty() {
            return None;
        }
        let notice = match checkpoint {
            Checkpoint::Scoring => Notice::IncompleteHole {
                hole: self.view_hole,
                missing: missing.iter().map(|m| m.player_id).collect(),
            },
            _ => Notice::IncompleteReview {
                checkpoint,
                missing: missing.clone(),
            },
        };
        Some((notice, missing))
    }

    async fn confirm_final(&mut self) -> Result<FinalizeOutcome, NavigationError> {
        let outcome =
            finalizer::finalize(&mut self.round, &mut self.ledger, &self.collaborator).await?;
        if matches!(outcome, FinalizeOutcome::Finalized { .. }) {
            self.collaborator
                .navigate_external(ExternalTarget::RoundSummary);
        }
        Ok(outcome)
    }

    /// Finalize from the final review without going through `advance`.
    ///
    /// Skips the completeness policy, like a forced advance.
    pub async fn finalize(&mut self) -> Result<FinalizeOutcome, NavigationError> {
        if self.round.is_finalized() {
            return Ok(FinalizeOutcome::AlreadyFinalized);
        }
        if self.gate.checkpoint() != Checkpoint::FinalReview {
            return Err(NavigationError::NotAtFinalReview);
        }
        self.confirm_final().await
    }

    /// Move backward. Backing off the starting hole hands control to round
    /// setup.
    pub fn retreat(&mut self) -> Result<StepOutcome, NavigationError> {
        if self.round.is_finalized() {
            return Err(NavigationError::RoundFinalized);
        }
        let from = self.view_hole;
        let layout = self.layout();
        let step = match self.gate.retreat(from, &layout) {
            Retreat::LeaveReview(checkpoint) => Step::LeftReview(checkpoint),
            Retreat::MoveTo(hole) => {
                self.view_hole = hole;
                Step::Moved { from, to: hole }
            },
            Retreat::ExitToSetup => {
                self.collaborator
                    .navigate_external(ExternalTarget::RoundSetup);
                Step::ExitedToSetup
            },
        };
        tracing::debug!(?step, view_hole = self.view_hole, "retreated");
        Ok(StepOutcome {
            step,
            notices: Vec::new(),
        })
    }
}
