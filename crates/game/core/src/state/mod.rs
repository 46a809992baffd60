//! Authoritative pot state.
//!
//! The [`ContentStore`] is the single source of truth replicated across
//! participants. Everything else a pot holds is derived from it.
mod budget;
#[cfg(feature = "serde")]
pub mod codec;
mod entry;
mod ids;
mod store;

pub use budget::UseBudget;
pub use entry::Entry;
pub use ids::{ItemId, PotId, Vec3};
pub use store::{ContentStore, StoreError, UseRemoval};
