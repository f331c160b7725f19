use std::fmt;

use serde::Serialize;

use teepad_core::ledger::{ScoreError, Standing};
use teepad_core::pot::{PotWinners, Pots};
use teepad_core::round::ConfigError;
use teepad_engine::{
    Checkpoint, EngineConfig, FinalizeOutcome, NavigationError, Notice, RoundCollaborator,
    ScoringSession, Step,
};

use crate::script::RoundScript;

/// Final results of a replayed round.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub round_id: String,
    pub holes: u32,
    pub starting_hole: u32,
    pub standings: Vec<Standing>,
    pub pots: Pots,
    pub winners: PotWinners,
    pub outcome: FinalizeOutcome,
}

/// Drive a session through every hole of `script` and close the round.
///
/// With `force`, holes the policy would block on are pushed through anyway.
pub async fn replay<C: RoundCollaborator>(
    script: &RoundScript,
    config: EngineConfig,
    collaborator: C,
    force: bool,
) -> Result<(Summary, C), ReplayError> {
    let mut session = ScoringSession::new(&script.round, script.players(), config, collaborator)?;

    let outcome = loop {
        let view = session.view();
        if view.checkpoint == Checkpoint::Scoring {
            let index = session.holes_played() as usize - 1;
            for p in &script.players {
                if let Some(strokes) = p.strokes_at(index) {
                    session.score_current(p.id, strokes)?;
                }
            }
            let order: Vec<&str> = session.honor_order().iter().map(|p| p.name.as_str()).collect();
            tracing::debug!(hole = view.view_hole, ?order, "tee order");
        }

        let out = match session.advance().await {
            Ok(out) => out,
            Err(NavigationError::Blocked { missing }) if force => {
                tracing::warn!(hole = view.view_hole, missing = missing.len(), "overriding block");
                session.force_advance().await?
            },
            Err(e) => return Err(e.into()),
        };

        for notice in &out.notices {
            log_notice(notice);
        }
        match out.step {
            Step::EnteredReview(checkpoint) => {
                for row in session.review_standings(checkpoint) {
                    tracing::info!(
                        ?checkpoint,
                        position = row.position,
                        player = %row.name,
                        score = %row.total.differential,
                        "review"
                    );
                }
            },
            Step::Finalized(outcome) => break outcome,
            _ => {},
        }
    };

    let summary = Summary {
        round_id: session.round().id.to_string(),
        holes: session.round().total_holes(),
        starting_hole: session.round().starting_hole(),
        standings: session.standings(),
        pots: session.pots(),
        winners: session.pot_winners(),
        outcome,
    };
    Ok((summary, session.into_collaborator()))
}

fn log_notice(notice: &Notice) {
    match notice {
        Notice::IncompleteHole { hole, missing } => {
            tracing::warn!(hole, ?missing, "hole incomplete");
        },
        Notice::IncompleteReview {
            checkpoint,
            missing,
        } => {
            tracing::warn!(?checkpoint, missing = missing.len(), "review incomplete");
        },
        Notice::PublishFailed(e) => tracing::warn!(error = %e, "publish failed"),
    }
}

#[derive(Debug)]
pub enum ReplayError {
    Config(ConfigError),
    Score(ScoreError),
    Navigation(NavigationError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "bad round setup: {e}"),
            Self::Score(e) => write!(f, "bad score: {e}"),
            Self::Navigation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Score(e) => Some(e),
            Self::Navigation(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ScoreError> for ReplayError {
    fn from(e: ScoreError) -> Self {
        Self::Score(e)
    }
}

impl From<NavigationError> for ReplayError {
    fn from(e: NavigationError) -> Self {
        Self::Navigation(e)
    }
}
