//! Repository contract for the per-pot data the host item carries.

use pot_core::state::codec::{self, ResetReason};
use pot_core::{ContentStore, PotId, UseBudget};

use super::error::{RepositoryError, Result};

/// Keys of the values persisted for one pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// JSON list of the store's entries.
    Contents,
    /// The pot's remaining use budget.
    Budget,
}

impl RecordKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Contents => "contents",
            RecordKey::Budget => "budget",
        }
    }
}

/// A pot's persisted state after loading.
#[derive(Debug)]
pub struct LoadedPot {
    pub store: ContentStore,
    pub budget: Option<u32>,
    /// True when the contents were missing or corrupt and were rewritten as
    /// the empty list.
    pub reset: bool,
}

/// Storage for the data a pot keeps on its host item.
///
/// Implementations only move raw values; [`PotRepository::load`] and
/// [`PotRepository::save`] own the format.
pub trait PotRepository: Send + Sync {
    fn read(&self, pot: PotId, key: RecordKey) -> Result<Option<String>>;

    fn write(&self, pot: PotId, key: RecordKey, value: &str) -> Result<()>;

    /// Removes every value stored for the pot.
    fn delete(&self, pot: PotId) -> Result<()>;

    /// Loads a pot's contents and budget without writing anything.
    ///
    /// Missing or corrupt contents load as an empty store with `reset` set.
    fn load(&self, pot: PotId) -> Result<LoadedPot> {
        let raw = self.read(pot, RecordKey::Contents)?;
        let decoded = codec::decode_or_empty(raw.as_deref());

        let reset = match decoded.reset {
            None => false,
            Some(ResetReason::Missing) => {
                tracing::debug!(%pot, "no persisted contents, starting empty");
                true
            }
            Some(ResetReason::Corrupt(error)) => {
                tracing::warn!(%pot, %error, "persisted contents are corrupt, resetting to empty");
                true
            }
        };

        let budget = match self.read(pot, RecordKey::Budget)? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(value) => Some(value),
                Err(error) => {
                    tracing::warn!(%pot, %error, "persisted budget is corrupt, ignoring");
                    None
                }
            },
            None => None,
        };

        Ok(LoadedPot {
            store: decoded.store,
            budget,
            reset,
        })
    }

    /// Like [`PotRepository::load`], but writes the empty list back when the
    /// contents were reset so the next load is clean.
    fn restore(&self, pot: PotId) -> Result<LoadedPot> {
        let loaded = self.load(pot)?;
        if loaded.reset {
            self.write(pot, RecordKey::Contents, codec::EMPTY_STORE_JSON)?;
        }
        Ok(loaded)
    }

    /// Persists a pot's contents and budget.
    fn save(&self, pot: PotId, store: &ContentStore, budget: &UseBudget) -> Result<()> {
        let contents =
            codec::encode(store).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.write(pot, RecordKey::Contents, &contents)?;
        if let Some(value) = budget.value() {
            self.write(pot, RecordKey::Budget, &value.to_string())?;
        }
        Ok(())
    }
}
