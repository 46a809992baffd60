//! File-based PotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use pot_core::PotId;

use super::error::{RepositoryError, Result};
use super::traits::{PotRepository, RecordKey};

/// File-based implementation of PotRepository.
///
/// # File Format
///
/// Each value lives in `pot_{id}.{key}.json`, written through a temp file
/// and an atomic rename.
pub struct FilePotRepository {
    base_dir: PathBuf,
}

impl FilePotRepository {
    /// Create a new file-based pot repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    fn record_path(&self, pot: PotId, key: RecordKey) -> PathBuf {
        self.base_dir
            .join(format!("pot_{}.{}.json", pot.0, key.as_str()))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl PotRepository for FilePotRepository {
    fn read(&self, pot: PotId, key: RecordKey) -> Result<Option<String>> {
        let path = self.record_path(pot, key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path).map_err(RepositoryError::Io)?;
        Ok(Some(value))
    }

    fn write(&self, pot: PotId, key: RecordKey, value: &str) -> Result<()> {
        let path = self.record_path(pot, key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::trace!("Saved pot[{}].{} to {}", pot, key.as_str(), path.display());
        Ok(())
    }

    fn delete(&self, pot: PotId) -> Result<()> {
        for key in [RecordKey::Contents, RecordKey::Budget] {
            let path = self.record_path(pot, key);
            if path.exists() {
                fs::remove_file(&path).map_err(RepositoryError::Io)?;
            }
        }
        tracing::debug!("Deleted pot[{}]", pot);
        Ok(())
    }
}
