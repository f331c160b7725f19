use std::fmt;

use teepad_core::ledger::MissingScore;

/// Failure reported by an external collaborator (store, relay, payment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorError(pub String);

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CollaboratorError {}

impl From<String> for CollaboratorError {
    fn from(e: String) -> Self {
        Self(e)
    }
}

impl From<&str> for CollaboratorError {
    fn from(e: &str) -> Self {
        Self(e.to_string())
    }
}

/// Why the round could not be closed. The round stays open in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeError {
    /// Publishing the score snapshot failed; nothing was committed.
    Publish(CollaboratorError),
    /// The terminal commit failed after a successful publish.
    Commit(CollaboratorError),
}

impl fmt::Display for FinalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Publish(e) => write!(f, "failed to publish final scores: {e}"),
            Self::Commit(e) => write!(f, "failed to finalize round: {e}"),
        }
    }
}

impl std::error::Error for FinalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Publish(e) | Self::Commit(e) => Some(e),
        }
    }
}

/// A navigation request the session refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Scores are missing and the completeness policy blocks the move.
    Blocked { missing: Vec<MissingScore> },
    /// Finalization is only possible from the final review.
    NotAtFinalReview,
    /// The round is closed; navigation is over.
    RoundFinalized,
    Finalize(FinalizeError),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked { missing } => {
                write!(f, "{} score(s) missing; complete them or override", missing.len())
            },
            Self::NotAtFinalReview => write!(f, "round can only be finalized from the final review"),
            Self::RoundFinalized => write!(f, "round is already finalized"),
            Self::Finalize(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for NavigationError {}

impl From<FinalizeError> for NavigationError {
    fn from(e: FinalizeError) -> Self {
        Self::Finalize(e)
    }
}
