use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_BASE_URL, DEFAULT_CONFIG_FILENAME};
use crate::error::ConfigError;

/// Optional on-disk settings, e.g.
///
/// ```yaml
/// base_url: https://licenses.example.com
/// token: ghp_...
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, alias = "base-url")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Settings after merging flags, environment and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub token: Option<String>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(DEFAULT_CONFIG_FILENAME))
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");

        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e, path.to_path_buf()))?;

    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e, path.to_path_buf()))
}

/// Flag (or its environment variable) beats the file, the file beats the
/// built-in default. An explicit `--config` path that does not exist is
/// treated like a missing default file.
pub fn resolve_settings(
    config_path: Option<&Path>,
    base_url_flag: Option<String>,
    token_flag: Option<String>,
) -> Result<Settings, ConfigError> {
    let file = match config_path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_file_config(&path)?,
        None => FileConfig::default(),
    };

    Ok(Settings {
        base_url: base_url_flag
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        token: token_flag.or(file.token),
    })
}
