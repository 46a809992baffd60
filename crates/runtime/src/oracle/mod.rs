//! Runtime wrappers around static pot content oracles.
//!
//! The item catalog is immutable at runtime and shared by every participant
//! through an [`OracleBundle`]; dynamic state lives in the pot replicas.
mod items;

use pot_core::{Env, PcgRng, PotEnv};
use std::sync::Arc;

pub use items::ItemOracleImpl;

/// Oracles a participant consults while applying commands.
#[derive(Clone)]
pub struct OracleBundle {
    pub(crate) items: Arc<ItemOracleImpl>,
    pub(crate) rng: PcgRng,
}

impl OracleBundle {
    pub fn new(items: Arc<ItemOracleImpl>) -> Self {
        Self { items, rng: PcgRng }
    }

    /// Converts the bundle into the environment pot-core expects.
    pub fn as_pot_env(&self) -> PotEnv<'_> {
        Env::with_all(self.items.as_ref(), &self.rng).as_pot_env()
    }

    pub fn items(&self) -> &ItemOracleImpl {
        &self.items
    }
}
