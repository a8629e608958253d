//! User preferences persisted between sessions (room layouts are not persisted)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::RoomSettings;

/// Which presentation(s) the central area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    TwoD,
    ThreeD,
    #[default]
    Split,
}

impl ViewMode {
    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::TwoD, ViewMode::ThreeD, ViewMode::Split]
    }

    pub fn shows_2d(self) -> bool {
        matches!(self, ViewMode::TwoD | ViewMode::Split)
    }

    pub fn shows_3d(self) -> bool {
        matches!(self, ViewMode::ThreeD | ViewMode::Split)
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ru,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

#[derive(Debug)]
pub enum PreferencesError {
    /// No home/config directory on this platform
    NoConfigDir,
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::NoConfigDir => write!(f, "No configuration directory available"),
            PreferencesError::Io(e) => write!(f, "Preferences I/O error: {}", e),
            PreferencesError::Json(e) => write!(f, "Preferences format error: {}", e),
        }
    }
}

impl std::error::Error for PreferencesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreferencesError::NoConfigDir => None,
            PreferencesError::Io(e) => Some(e),
            PreferencesError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PreferencesError {
    fn from(e: std::io::Error) -> Self {
        PreferencesError::Io(e)
    }
}

impl From<serde_json::Error> for PreferencesError {
    fn from(e: serde_json::Error) -> Self {
        PreferencesError::Json(e)
    }
}

/// All persisted preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Last room settings (theme, lighting, audio, grid)
    #[serde(default)]
    pub room: RoomSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub language: Language,
}

impl Preferences {
    /// Default location: `<config dir>/preferences.json`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "studyroom", "studyroom")
            .map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    /// Load from the default location, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring preferences at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::default_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!("Preferences saved to {}", path.display());
        Ok(())
    }
}
