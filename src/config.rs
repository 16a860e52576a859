use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LectioError, Result};

/// Name of the configuration file stored inside the lectio config directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Directory name under the platform config root.
pub const LECTIO_DIR: &str = "lectio";

/// Client configuration.
///
/// Carries the annotation server coordinates and the user's display
/// preferences; the translation choice persists here across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LectioConfig {
    /// Base URL of the reading-plan annotation server.
    pub server_url: String,
    /// Base URL of the scripture text API.
    pub scripture_api: String,
    /// Preferred translation code (SZIT, KNB, RUF, KG, ...).
    pub translation: String,
    /// Default color for new highlights.
    pub highlight_color: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Path to the reading plan JSON file.
    pub reading_plan: Option<PathBuf>,
}

impl Default for LectioConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            scripture_api: "https://szentiras.eu/api/idezet".to_string(),
            translation: "SZIT".to_string(),
            highlight_color: "yellow".to_string(),
            timeout_secs: 10,
            reading_plan: None,
        }
    }
}

/// Returns the lectio directory under the platform config root.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(LECTIO_DIR))
        .ok_or_else(|| LectioError::Config {
            message: "could not determine the user config directory".to_string(),
        })
}

/// Returns the path to the configuration file (`config.json`).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Loads the configuration from the given path.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config_from(path: &Path) -> Result<LectioConfig> {
    if !path.exists() {
        return Ok(LectioConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| LectioError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: LectioConfig = serde_json::from_str(&contents).map_err(|e| LectioError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })?;

    Ok(config)
}

/// Loads the configuration from the default location.
pub fn load_config() -> Result<LectioConfig> {
    load_config_from(&config_path()?)
}

/// Saves the configuration to the given path using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final
/// location, ensuring that a partial write never corrupts the
/// configuration.
pub fn save_config_to(path: &Path, config: &LectioConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LectioError::Config {
            message: format!(
                "failed to create config directory '{}': {}",
                parent.display(),
                e
            ),
        })?;
    }

    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| LectioError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| LectioError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| LectioError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}

/// Saves the configuration to the default location.
pub fn save_config(config: &LectioConfig) -> Result<()> {
    save_config_to(&config_path()?, config)
}
