//! Error types for the command execution pipeline.

use crate::command::{AddEntry, Clear, PotTransition, RemoveOneUse};
use crate::effects::AggregateError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, PotError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing a command through the pot engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExecuteError {
    #[error("add entry failed: {0}")]
    AddEntry(TransitionPhaseError<<AddEntry as PotTransition>::Error>),

    #[error("clear failed: {0}")]
    Clear(TransitionPhaseError<<Clear as PotTransition>::Error>),

    #[error("remove one use failed: {0}")]
    RemoveOneUse(TransitionPhaseError<<RemoveOneUse as PotTransition>::Error>),

    /// The command was applied but the combined effect could not be rebuilt.
    #[error("{command} applied but aggregation failed: {source}")]
    Aggregate {
        command: &'static str,
        #[source]
        source: AggregateError,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ExecuteError {
    /// True when the store was mutated before the error surfaced.
    pub fn state_changed(&self) -> bool {
        matches!(self, ExecuteError::Aggregate { .. })
    }

    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::AddEntry(e) => Some(e.phase),
            ExecuteError::Clear(e) => Some(e.phase),
            ExecuteError::RemoveOneUse(e) => Some(e.phase),
            ExecuteError::Aggregate { .. } | ExecuteError::Oracle(_) => None,
        }
    }
}

impl PotError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::AddEntry(e) => e.error.severity(),
            ExecuteError::Clear(e) => e.error.severity(),
            ExecuteError::RemoveOneUse(e) => e.error.severity(),
            ExecuteError::Aggregate { source, .. } => source.severity(),
            ExecuteError::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::AddEntry(e) => e.error.error_code(),
            ExecuteError::Clear(e) => e.error.error_code(),
            ExecuteError::RemoveOneUse(e) => e.error.error_code(),
            ExecuteError::Aggregate { source, .. } => source.error_code(),
            ExecuteError::Oracle(e) => e.error_code(),
        }
    }
}
