//! Persisted settings document and where it lives on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bindings::BindingMap;
use crate::window_config::DEFAULT_SCALE;

const APP_DIR: &str = "ostrich";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no per-user configuration directory on this platform")]
    NoConfigDir,
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Root of the settings file. Key names are kept stable across versions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of the last ROM that loaded successfully.
    #[serde(rename = "ROMDirectory", skip_serializing_if = "Option::is_none")]
    pub rom_directory: Option<PathBuf>,
    #[serde(rename = "Window")]
    pub window: WindowSettings,
    #[serde(rename = "Input")]
    pub input: InputSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Signed so that a hand-edited non-positive value is ignored rather than
    /// failing the whole document.
    #[serde(rename = "Scale")]
    pub scale: i64,
    #[serde(rename = "VSyncEnabled")]
    pub vsync_enabled: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            scale: i64::from(DEFAULT_SCALE),
            vsync_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Button name → SDL key name.
    #[serde(rename = "ButtonToKey")]
    pub button_to_key: BTreeMap<String, String>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            button_to_key: BindingMap::default().to_names(),
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Reads and writes the settings document at a fixed path.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/ostrich/config.toml`, e.g. `~/.config/ostrich/config.toml` on Linux.
    pub fn in_config_dir() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let text = std::fs::read_to_string(&self.path).map_err(io_error(&self.path))?;
        Settings::from_toml(&text)
    }

    /// Loads the document, substituting all defaults on any failure.
    pub fn load(&self) -> Settings {
        if !self.path.exists() {
            info!("no settings at {}, using defaults", self.path.display());
            return Settings::default();
        }
        match self.try_load() {
            Ok(settings) => {
                info!("loaded settings from {}", self.path.display());
                settings
            }
            Err(e) => {
                warn!("{e}; using default settings");
                Settings::default()
            }
        }
    }

    /// Writes the document, creating the directory on first use. Goes through a
    /// temporary file so a failed write never truncates the previous settings.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let text = settings.to_toml()?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, text.as_bytes()).map_err(io_error(&tmp))?;
        std::fs::rename(&tmp, &self.path).map_err(io_error(&self.path))?;
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SettingsError {
    let path = path.to_path_buf();
    move |source| SettingsError::Io { path, source }
}
