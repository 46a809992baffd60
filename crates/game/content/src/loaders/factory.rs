//! Content factory for loading everything a participant needs.

use std::path::{Path, PathBuf};

use pot_core::{ItemDefinition, PotConfig};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads all pot content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load pot configuration from `config.toml`.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load_config(&self) -> LoadResult<PotConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(PotConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
