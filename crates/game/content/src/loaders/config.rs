//! Pot configuration loader.

use std::path::Path;

use pot_core::PotConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for pot configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<PotConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> LoadResult<PotConfig> {
        let config: PotConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_uses == 0 {
            anyhow::bail!("max_uses must be at least 1");
        }
        Ok(config)
    }
}
