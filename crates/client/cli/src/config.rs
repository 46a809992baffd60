//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one scripted cooking session.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `items.ron` and `config.toml`.
    pub data_dir: PathBuf,
    /// Participants in the session, the host included.
    pub participants: u32,
    pub seed: u64,
    /// Where the host persists pot contents. Nothing is saved when unset.
    pub save_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            participants: 3,
            seed: 0,
            save_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `POT_DATA_DIR` - Content directory (default: `data`)
    /// - `POT_PARTICIPANTS` - Number of participants (default: 3, minimum 1)
    /// - `POT_SEED` - Seed for the removal pickers (default: 0)
    /// - `POT_SAVE_DIR` - Directory for persisted pot contents (optional)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("POT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(participants) = read_env::<u32>("POT_PARTICIPANTS") {
            config.participants = participants.max(1);
        }
        if let Some(seed) = read_env::<u64>("POT_SEED") {
            config.seed = seed;
        }
        config.save_dir = env::var("POT_SAVE_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
