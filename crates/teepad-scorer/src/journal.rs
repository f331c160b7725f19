use std::sync::Mutex;

use teepad_core::pot::Pots;
use teepad_core::round::Round;
use teepad_engine::{CollaboratorError, ExternalTarget, RoundCollaborator, ScoreSnapshot};

/// Collaborator for offline replays: logs every boundary call and keeps the
/// most recent published snapshot in memory.
#[derive(Debug, Default)]
pub struct Journal {
    latest: Mutex<Option<ScoreSnapshot>>,
    publishes: Mutex<u32>,
}

impl Journal {
    pub fn publishes(&self) -> u32 {
        *self.publishes.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn latest(&self) -> Option<ScoreSnapshot> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl RoundCollaborator for Journal {
    async fn publish_scores(&self, snapshot: &ScoreSnapshot) -> Result<(), CollaboratorError> {
        let scored: usize = snapshot.players.iter().map(|p| p.scores.len()).sum();
        tracing::info!(round = %snapshot.round_id, scored, "scores published");
        *self.publishes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        *self.latest.lock().unwrap_or_else(|e| e.into_inner()) = Some(snapshot.clone());
        Ok(())
    }

    async fn finalize_round(&self, round: &Round) -> Result<(), CollaboratorError> {
        tracing::info!(round = %round.id, "round committed");
        Ok(())
    }

    async fn dispatch_payout(&self, round: &Round, pots: &Pots) -> Result<(), CollaboratorError> {
        tracing::info!(
            round = %round.id,
            entry = pots.entry,
            ace = pots.ace,
            "payout requested"
        );
        Ok(())
    }

    fn navigate_external(&self, target: ExternalTarget) {
        tracing::info!(?target, "leaving scoring screen");
    }
}
