use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teepad_core::ledger::ScoreLedger;
use teepad_core::player::Player;
use teepad_core::pot::Pots;
use teepad_core::round::Round;

use crate::error::CollaboratorError;

/// Point-in-time copy of the card, handed to the store on publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub round_id: Uuid,
    /// Unix epoch seconds when the snapshot was taken.
    pub taken_at: u64,
    pub players: Vec<Player>,
    pub pots: Pots,
}

impl ScoreSnapshot {
    pub fn capture(round: &Round, ledger: &ScoreLedger) -> Self {
        let players = ledger.players().to_vec();
        let pots = Pots::calculate(&players, round.entry_fee_amount, round.ace_pot_fee_amount);
        Self {
            round_id: round.id,
            taken_at: unix_now(),
            players,
            pots,
        }
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Screens outside the scoring flow the engine may ask to leave for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalTarget {
    /// Back out of the first hole to the round setup screen.
    RoundSetup,
    /// The round closed; show the results.
    RoundSummary,
}

/// Everything the engine needs from the outside world.
///
/// Persistence, broadcast and payment live behind this trait; the engine only
/// decides when each call happens and what a failure means for the round.
pub trait RoundCollaborator: Send + Sync {
    /// Persist or broadcast the current card.
    fn publish_scores(
        &self,
        snapshot: &ScoreSnapshot,
    ) -> impl Future<Output = Result<(), CollaboratorError>> + Send;

    /// Irrevocably close the round in the shared store.
    fn finalize_round(&self, round: &Round)
    -> impl Future<Output = Result<(), CollaboratorError>> + Send;

    /// Hand the pots off for payout. Only called when there is money in them.
    fn dispatch_payout(
        &self,
        round: &Round,
        pots: &Pots,
    ) -> impl Future<Output = Result<(), CollaboratorError>> + Send;

    /// Leave the scoring screen.
    fn navigate_external(&self, target: ExternalTarget);
}
