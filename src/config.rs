//! Journal configuration
//!
//! Read from TOML; every field is optional and falls back to the layout of
//! the stock 640x480 journal scene.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::layout::RenderSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Flat-file quest definitions
    pub quest_file: PathBuf,
    /// Debug view: list every quest as current, discovered or not
    pub show_all_quests: bool,
    /// Text metrics for the info panel
    pub render: RenderSettings,
    /// Usable width of the info panel
    pub info_width: f32,
    /// Usable width of a quest list row
    pub list_width: f32,
    pub list_row_height: f32,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            quest_file: PathBuf::from("Data/QuestData.txt"),
            show_all_quests: false,
            render: RenderSettings::default(),
            info_width: 408.0,
            list_width: 160.0,
            list_row_height: 32.0,
        }
    }
}

impl JournalConfig {
    /// Load a config file, failing on a missing file or bad TOML
    pub fn load(path: &Path) -> Result<Self, JournalError> {
        let contents = std::fs::read_to_string(path).map_err(|source| JournalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| JournalError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded journal config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load the per-user config, falling back to defaults on any problem
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using default journal config", e);
                Self::default()
            }
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), not(target_os = "android")))]
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quest-journal").join("journal.toml"))
}

#[cfg(target_os = "android")]
fn config_path() -> Option<PathBuf> {
    Some(PathBuf::from("journal.toml"))
}

#[cfg(target_arch = "wasm32")]
fn config_path() -> Option<PathBuf> {
    None
}
