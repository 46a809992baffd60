//! Cosmetic representation of a pot's content.
//!
//! Visual entries are a locally recomputed cache: one floating stand-in per
//! store entry, converged by diffing after every store change.
mod placement;
mod reconcile;

pub use placement::Placement;
pub use reconcile::{ReconcileReport, VisualEntry, VisualReconciler};
