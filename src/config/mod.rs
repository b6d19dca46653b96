use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::ThemeMode;
use crate::view::ToggleProps;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
    #[error("failed to read {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid toggle config: {0}")]
    ParseConfig(#[from] serde_json::Error),
}

const APP_DIR: &str = "daynight-toggle";
const APP_CONFIG_FILE: &str = "config.json";

/// Mount parameters for a toggle; every field is optional in `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Initial mode; also the value the host keeps re-supplying.
    pub theme: ThemeMode,
    pub scale: f64,
    pub class_name: Option<String>,
    /// Toggle along with the OS colour scheme.
    pub follow_system: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            scale: 3.0,
            class_name: None,
            follow_system: false,
        }
    }
}

impl ToggleConfig {
    pub fn props(&self) -> ToggleProps {
        ToggleProps {
            scale: self.scale,
            class_name: self.class_name.clone(),
        }
    }
}

pub fn parse_toggle_config(contents: &str) -> Result<ToggleConfig, ConfigError> {
    Ok(serde_json::from_str(contents)?)
}

pub fn load_toggle_config() -> ToggleConfig {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    load_toggle_config_with(xdg_config_home.as_deref(), home.as_deref())
}

pub fn load_toggle_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ToggleConfig {
    match read_toggle_config(xdg_config_home, home) {
        Ok(Some(config)) => config,
        Ok(None) => ToggleConfig::default(),
        Err(err) => {
            tracing::warn!(%err, "failed to load toggle config; using defaults");
            ToggleConfig::default()
        }
    }
}

fn read_toggle_config(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<Option<ToggleConfig>, ConfigError> {
    let path = toggle_config_path(xdg_config_home, home)?;
    if !path.exists() {
        tracing::debug!(?path, "no toggle config file");
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    let config = parse_toggle_config(&contents)?;
    tracing::debug!(?path, mode = %config.theme, "loaded toggle config");
    Ok(Some(config))
}

/// `$XDG_CONFIG_HOME/daynight-toggle/config.json`, or under `$HOME/.config`
/// when `XDG_CONFIG_HOME` is unset or empty.
pub fn toggle_config_path(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let base = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home.ok_or(ConfigError::MissingHomeDirectory)?.join(".config"),
    };
    Ok(base.join(APP_DIR).join(APP_CONFIG_FILE))
}
