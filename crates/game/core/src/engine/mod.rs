//! Replicated command execution.
//!
//! The [`PotEngine`] is the only path that mutates a pot's [`PotState`]. It
//! drives each [`PotCommand`] through its transition phases and then rebuilds
//! the pot's derived caches, so every participant that feeds it the same
//! command sequence ends up with the same store and combined effect.
//!
//! [`PotState`]: crate::pot::PotState

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::command::{CommandResult, PotCommand};
use crate::env::PotEnv;
use crate::host::PotHost;
use crate::pot::{CookingPot, PotPhase, RefreshReport};

/// Complete outcome of command execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// What the command did to the store.
    pub result: CommandResult,
    pub phase_before: PotPhase,
    pub phase: PotPhase,
    pub total_uses: u32,
    /// Store digest after the command.
    pub digest: [u8; 32],
    /// What rebuilding the derived caches did.
    pub refresh: RefreshReport,
}

/// Applies replicated commands to one pot replica.
pub struct PotEngine<'a> {
    pot: &'a mut CookingPot,
}

impl<'a> PotEngine<'a> {
    pub fn new(pot: &'a mut CookingPot) -> Self {
        Self { pot }
    }

    /// Builds the derived caches of a freshly created or restored pot.
    pub fn initialize<H>(&mut self, env: PotEnv<'_>, host: &mut H) -> Result<RefreshReport, ExecuteError>
    where
        H: PotHost + ?Sized,
    {
        let items = env.items()?;
        let rng = env.rng()?;
        self.pot
            .refresh(host, items, rng)
            .map_err(|source| ExecuteError::Aggregate {
                command: "initialize",
                source,
            })
    }

    /// Executes a command, then recomputes the combined effect and visuals.
    ///
    /// Oracles are resolved first so a missing one never leaves the store
    /// mutated without refreshed caches. A validation failure leaves the pot
    /// untouched; an aggregation failure after a successful mutation keeps the
    /// mutation and reports [`ExecuteError::Aggregate`].
    pub fn execute<H>(
        &mut self,
        env: PotEnv<'_>,
        host: &mut H,
        command: &PotCommand,
    ) -> Result<ExecutionOutcome, ExecuteError>
    where
        H: PotHost + ?Sized,
    {
        let items = env.items()?;
        let rng = env.rng()?;

        let phase_before = self.pot.phase();
        let mut staged = self.pot.state().clone();
        let result = transition::execute_transition(command, &mut staged)?;
        *self.pot.state_mut() = staged;

        let refresh = self
            .pot
            .refresh(host, items, rng)
            .map_err(|source| ExecuteError::Aggregate {
                command: command.as_str(),
                source,
            })?;

        Ok(ExecutionOutcome {
            result,
            phase_before,
            phase: self.pot.phase(),
            total_uses: self.pot.total_uses(),
            digest: self.pot.store().digest(),
            refresh,
        })
    }
}
