//! Combined effect computation and materialization.
mod aggregate;
mod applier;
mod status;

pub use aggregate::{AggregateError, CombinedEffectSet, aggregate};
pub use applier::{AppliedEffects, EffectApplier};
pub use status::{StatusDelta, StatusKind};
