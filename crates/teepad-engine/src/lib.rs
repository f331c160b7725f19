pub mod collaborator;
pub mod config;
pub mod error;
pub mod finalizer;
pub mod review;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use collaborator::{ExternalTarget, RoundCollaborator, ScoreSnapshot};
pub use config::{CompletenessPolicy, EngineConfig};
pub use error::{CollaboratorError, FinalizeError, NavigationError};
pub use finalizer::{FinalizeOutcome, PayoutStatus};
pub use review::{Checkpoint, ReviewGate};
pub use session::{Notice, ScoringSession, Step, StepOutcome, ViewState};
