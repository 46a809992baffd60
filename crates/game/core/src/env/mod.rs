//! Read-only collaborators the pot consults.
//!
//! The [`ItemOracle`] is the effect definition lookup; the [`RngOracle`]
//! drives cosmetic placement. [`Env`] bundles them so the engine can reach
//! both without coupling to concrete implementations.
mod error;
mod items;
mod rng;

pub use error::OracleError;
pub use items::{
    Capability, ItemCapability, ItemDefinition, ItemOracle, TriggerFlags, VisualGeometry,
};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the read-only oracles required by the engine.
pub struct Env<'a, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    items: Option<&'a I>,
    rng: Option<&'a R>,
}

impl<I, R> Clone for Env<'_, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, R> Copy for Env<'_, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type PotEnv<'a> = Env<'a, dyn ItemOracle + 'a, dyn RngOracle + 'a>;

impl<'a, I, R> Env<'a, I, R>
where
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(items: Option<&'a I>, rng: Option<&'a R>) -> Self {
        Self { items, rng }
    }

    pub fn with_all(items: &'a I, rng: &'a R) -> Self {
        Self::new(Some(items), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            items: None,
            rng: None,
        }
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, I, R> Env<'a, I, R>
where
    I: ItemOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `PotEnv`.
    pub fn as_pot_env(&self) -> PotEnv<'a> {
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(items, rng)
    }
}
