//! Deterministic cooking pot logic shared by every participant.
//!
//! `pot-core` defines the authoritative [`ContentStore`], the replicated
//! [`PotCommand`]s that mutate it, and the pure derivations built on top of
//! it: the uses-weighted [`CombinedEffectSet`] and the cosmetic visual
//! entries. All mutation flows through [`engine::PotEngine`]; the crate does
//! no I/O and never logs, reporting outcomes through return values.
pub mod affliction;
pub mod command;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod host;
pub mod pot;
pub mod state;
pub mod visual;

#[cfg(test)]
pub(crate) mod test_support;

pub use affliction::{Affliction, AfflictionEffect, AfflictionKind, AfflictionTiming};
pub use command::{CommandResult, ItemInstance, PotCommand, PotTransition, RequestError};
pub use config::{PotConfig, VisualConfig};
pub use effects::{
    AggregateError, AppliedEffects, CombinedEffectSet, EffectApplier, StatusDelta, StatusKind,
    aggregate,
};
pub use engine::{ExecuteError, ExecutionOutcome, PotEngine, TransitionPhase, TransitionPhaseError};
pub use env::{
    Capability, Env, ItemCapability, ItemDefinition, ItemOracle, OracleError, PcgRng, PotEnv,
    RngOracle, TriggerFlags, VisualGeometry,
};
pub use error::{ErrorSeverity, NeverError, PotError};
pub use host::{ApplierHandle, ApplierHost, PotHost, VisualAnchor, VisualHandle, VisualHost};
pub use pot::{CookingPot, PotPhase, PotState, RefreshReport};
pub use state::{ContentStore, Entry, ItemId, PotId, StoreError, UseBudget, UseRemoval, Vec3};
pub use visual::{Placement, ReconcileReport, VisualEntry, VisualReconciler};
