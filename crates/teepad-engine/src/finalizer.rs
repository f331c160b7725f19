use serde::{Deserialize, Serialize};

use teepad_core::ledger::ScoreLedger;
use teepad_core::pot::Pots;
use teepad_core::round::Round;

use crate::collaborator::{RoundCollaborator, ScoreSnapshot};
use crate::error::FinalizeError;

/// State of the payout request made after the round closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayoutStatus {
    /// Both pots were empty.
    NotRequired,
    Requested,
    /// The round is closed regardless; the payout has to be retried elsewhere.
    Failed(String),
}

/// Result of a finalize call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalizeOutcome {
    Finalized { pots: Pots, payout: PayoutStatus },
    /// A previous call already closed the round; nothing was repeated.
    AlreadyFinalized,
}

/// Close the round.
///
/// Publishes a snapshot of the card, commits the close, then marks the round
/// finalized, freezes the ledger and requests a payout when the pots hold
/// money. A publish or commit failure leaves the round open so the host can
/// retry.
pub async fn finalize<C: RoundCollaborator>(
    round: &mut Round,
    ledger: &mut ScoreLedger,
    collaborator: &C,
) -> Result<FinalizeOutcome, FinalizeError> {
    if round.is_finalized() {
        tracing::debug!(round = %round.id, "finalize called on a closed round");
        return Ok(FinalizeOutcome::AlreadyFinalized);
    }

    let snapshot = ScoreSnapshot::capture(round, ledger);
    if let Err(e) = collaborator.publish_scores(&snapshot).await {
        tracing::error!(round = %round.id, error = %e, "final score publish failed");
        return Err(FinalizeError::Publish(e));
    }

    if let Err(e) = collaborator.finalize_round(round).await {
        tracing::error!(round = %round.id, error = %e, "round commit failed");
        return Err(FinalizeError::Commit(e));
    }

    round.mark_finalized();
    ledger.freeze();
    let pots = snapshot.pots;
    tracing::info!(round = %round.id, total_pot = pots.total(), "round finalized");

    let payout = if pots.is_empty() {
        PayoutStatus::NotRequired
    } else {
        match collaborator.dispatch_payout(round, &pots).await {
            Ok(()) => PayoutStatus::Requested,
            Err(e) => {
                tracing::error!(round = %round.id, error = %e, "payout dispatch failed");
                PayoutStatus::Failed(e.to_string())
            },
        }
    };

    Ok(FinalizeOutcome::Finalized { pots, payout })
}
