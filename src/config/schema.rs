//! Configuration schema for dagcache
//!
//! Configuration is stored at `~/.config/dagcache/config.toml`

use crate::dag::DEFAULT_REVISION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset settings
    pub dataset: DatasetConfig,
}

/// Dataset cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding dataset files (default: platform dataset dir)
    pub dir: Option<PathBuf>,

    /// Format revision encoded in file names
    pub revision: u32,

    /// Number of datasets of the current revision kept by prune
    pub datasets_on_disk: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dir: None,
            revision: DEFAULT_REVISION,
            datasets_on_disk: 2,
        }
    }
}

impl DatasetConfig {
    /// Configured directory, or the platform default
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_dataset_dir)
    }

    /// Check loaded values and expand a leading `~` in `dir`
    pub fn normalize(&mut self) -> Result<(), String> {
        if let Some(dir) = &self.dir {
            if dir.as_os_str().is_empty() {
                return Err("dataset.dir must not be empty".to_string());
            }
            if let Ok(rest) = dir.strip_prefix("~") {
                let home = dirs::home_dir()
                    .ok_or_else(|| "cannot expand ~ without a home directory".to_string())?;
                self.dir = Some(home.join(rest));
            }
        }
        if self.datasets_on_disk == 0 {
            return Err("dataset.datasets_on_disk must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Platform default dataset directory
pub fn default_dataset_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if cfg!(windows) {
        home.join("AppData").join("Ethash")
    } else {
        home.join(".zrmash")
    }
}
