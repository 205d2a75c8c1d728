//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs/settings.toml (or platform equivalent)

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bag::PREVIEW_LENGTH;
use crate::error::SettingsError;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rule parameters
    pub rules: RuleSettings,
    /// Fixed RNG seed for the piece queue; random when absent
    pub seed: Option<u64>,
}

/// Rule parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Ticks per row of gravity
    pub gravity: u32,
    /// Number of upcoming pieces kept visible
    pub preview_length: usize,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            gravity: 30,
            preview_length: PREVIEW_LENGTH,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the config directory, or fall back to defaults
    ///
    /// A missing file is normal; an unreadable or invalid one is logged and
    /// ignored.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring settings file");
                Self::default()
            }
        }
    }

    /// Load and validate settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let preview = self.rules.preview_length;
        if !(1..=7).contains(&preview) {
            return Err(SettingsError::Invalid(format!(
                "preview_length must be between 1 and 7, got {preview}"
            )));
        }
        Ok(())
    }
}
