use std::sync::Mutex;

use teepad_core::pot::Pots;
use teepad_core::round::Round;

use crate::collaborator::{ExternalTarget, RoundCollaborator, ScoreSnapshot};
use crate::error::CollaboratorError;

/// A collaborator call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Publish,
    FinalizeRound,
    DispatchPayout(u64),
    Navigate(ExternalTarget),
}

/// In-memory collaborator that records every call and fails on demand.
#[derive(Debug, Default)]
pub struct RecordingCollaborator {
    calls: Mutex<Vec<Call>>,
    snapshots: Mutex<Vec<ScoreSnapshot>>,
    publish_error: Mutex<Option<String>>,
    commit_error: Mutex<Option<String>>,
    payout_error: Mutex<Option<String>>,
}

impl RecordingCollaborator {
    pub fn failing_publish(msg: &str) -> Self {
        let c = Self::default();
        c.set_publish_error(Some(msg));
        c
    }

    pub fn failing_commit(msg: &str) -> Self {
        let c = Self::default();
        *c.commit_error.lock().unwrap() = Some(msg.to_string());
        c
    }

    pub fn failing_payout(msg: &str) -> Self {
        let c = Self::default();
        *c.payout_error.lock().unwrap() = Some(msg.to_string());
        c
    }

    pub fn set_publish_error(&self, msg: Option<&str>) {
        *self.publish_error.lock().unwrap() = msg.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Publish))
            .count()
    }

    pub fn last_snapshot(&self) -> Option<ScoreSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(slot: &Mutex<Option<String>>) -> Result<(), CollaboratorError> {
        match slot.lock().unwrap().as_deref() {
            Some(msg) => Err(msg.into()),
            None => Ok(()),
        }
    }
}

impl RoundCollaborator for RecordingCollaborator {
    async fn publish_scores(&self, snapshot: &ScoreSnapshot) -> Result<(), CollaboratorError> {
        self.record(Call::Publish);
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Self::outcome(&self.publish_error)
    }

    async fn finalize_round(&self, _round: &Round) -> Result<(), CollaboratorError> {
        self.record(Call::FinalizeRound);
        Self::outcome(&self.commit_error)
    }

    async fn dispatch_payout(&self, _round: &Round, pots: &Pots) -> Result<(), CollaboratorError> {
        self.record(Call::DispatchPayout(pots.total()));
        Self::outcome(&self.payout_error)
    }

    fn navigate_external(&self, target: ExternalTarget) {
        self.record(Call::Navigate(target));
    }
}
