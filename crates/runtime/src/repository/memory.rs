//! In-memory PotRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use pot_core::PotId;

use super::error::{RepositoryError, Result};
use super::traits::{PotRepository, RecordKey};

/// In-memory implementation of PotRepository.
#[derive(Default)]
pub struct InMemoryPotRepository {
    records: RwLock<HashMap<(PotId, RecordKey), String>>,
}

impl InMemoryPotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PotRepository for InMemoryPotRepository {
    fn read(&self, pot: PotId, key: RecordKey) -> Result<Option<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&(pot, key)).cloned())
    }

    fn write(&self, pot: PotId, key: RecordKey, value: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert((pot, key), value.to_owned());
        Ok(())
    }

    fn delete(&self, pot: PotId) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.retain(|(id, _), _| *id != pot);
        Ok(())
    }
}
