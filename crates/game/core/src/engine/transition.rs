//! Command transition dispatch.

use crate::command::{CommandResult, PotCommand, PotTransition};
use crate::pot::PotState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the pot state and return the outcome
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut PotState,
) -> Result<T::Outcome, TransitionPhaseError<T::Error>>
where
    T: PotTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let outcome = transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(outcome)
}

/// Routes a command to its transition and wraps the outcome.
pub(super) fn execute_transition(
    command: &PotCommand,
    state: &mut PotState,
) -> Result<CommandResult, ExecuteError> {
    match command {
        PotCommand::AddEntry(transition) => drive_transition(transition, state)
            .map(CommandResult::Added)
            .map_err(ExecuteError::AddEntry),
        PotCommand::Clear(transition) => drive_transition(transition, state)
            .map(CommandResult::Cleared)
            .map_err(ExecuteError::Clear),
        PotCommand::RemoveOneUse(transition) => drive_transition(transition, state)
            .map(CommandResult::UseRemoved)
            .map_err(ExecuteError::RemoveOneUse),
    }
}
