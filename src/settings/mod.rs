pub mod attribute;
pub mod theme;

use std::{fs, path::PathBuf};

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants::paths::settings_path, ui::menu::Orientation};

/// On-disk settings. Every field is optional so that a partial file
/// keeps working across versions; readers go through the getters.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub spacing: Option<i32>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub countdown_template: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_spacing(&self) -> i32 {
        self.spacing.unwrap_or(2)
    }

    pub fn get_orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    pub fn get_theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("default_theme.json5")
    }

    pub fn get_countdown_template(&self) -> &str {
        self.countdown_template
            .as_deref()
            .unwrap_or("The menu flips direction in {seconds} second{s}...")
    }

    pub fn default_path() -> PathBuf {
        settings_path()
    }

    /// Loads the settings file, writing the embedded default on first
    /// run. A malformed file is an error, not a panic; the caller
    /// decides whether to bail or fall back.
    pub fn load(path: PathBuf) -> Result<Self, SettingsError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(options.from_str(&content)?),
            Err(_) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, DEFAULT_SETTINGS)?;
                Ok(options
                    .from_str(DEFAULT_SETTINGS)
                    .expect("default settings should be always valid"))
            }
        }
    }

    pub fn reset_config(path: PathBuf) {
        if let Err(err) = fs::write(&path, DEFAULT_SETTINGS) {
            log::error!("Failed to reset config at {:?}: {}", path, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::menu::Orientation;

    #[test]
    fn default_settings_parse() {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        let settings: Settings = options
            .from_str(DEFAULT_SETTINGS)
            .expect("embedded defaults must parse");

        assert_eq!(settings.get_spacing(), 2);
        assert_eq!(settings.get_orientation(), Orientation::Horizontal);
        assert!(settings.get_countdown_template().contains("{seconds}"));
    }

    #[test]
    fn getters_fall_back_when_fields_missing() {
        let settings = Settings::new();
        assert_eq!(settings.get_spacing(), 2);
        assert_eq!(settings.get_theme_name(), "default_theme.json5");
    }
}
