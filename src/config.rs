use std::io;
use std::path::{Path, PathBuf};

use crate::serialization::DEFAULT_SNAPSHOT_FILE;

/// Front-end settings. Every field is optional in the TOML file.
///
/// ```
/// use play_2048::config::Config;
/// let cfg = Config::from_toml_str("seed = 42\nconfirm_reset = false").unwrap();
/// assert_eq!(cfg.seed, Some(42));
/// assert!(!cfg.confirm_reset);
/// assert!(cfg.prompt_restore);
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File holding the saved game.
    pub snapshot_path: PathBuf,
    /// Seed for tile placement; entropy when absent.
    pub seed: Option<u64>,
    /// Ask before restoring a saved game (otherwise restore silently).
    pub prompt_restore: bool,
    /// Ask before resetting a game in progress.
    pub confirm_reset: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            seed: None,
            prompt_restore: true,
            confirm_reset: true,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
