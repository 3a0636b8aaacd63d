//! Run configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Update run configuration, read from a JSON document.
///
/// `mods` keeps its order through resolution and download; identifiers
/// containing "show" are fetched from their release page only.
/// `exempt_mods` names mods resolved without version checks when nothing
/// in their catalog matches.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UpdateConfig {
    /// Target game version, e.g. "1.19.8".
    pub version: String,
    /// Where downloads land; created if absent.
    pub download_folder: PathBuf,
    pub mods: Vec<String>,
    #[serde(default)]
    pub exempt_mods: Vec<String>,
}

impl UpdateConfig {
    /// Load a config document from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
