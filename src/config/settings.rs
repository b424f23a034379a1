//! Settings for the instructions CLI.
//!
//! Read from `settings.json` in the platform-specific config directory via
//! `directories::ProjectDirs`, then overridden by environment variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::instructions::DEFAULT_APP_NAME;

pub const ENV_APP_NAME: &str = "DKMA_APP_NAME";
pub const ENV_MANUFACTURER: &str = "DKMA_MANUFACTURER";
pub const ENV_DEVICE_ID: &str = "ADB_DEVICE_ID";
pub const ENV_DATA_PATH: &str = "DKMA_DATA_PATH";
pub const ENV_LANG: &str = "DKMA_LANG";
pub const ENV_ADB_PATH: &str = "ADB_PATH";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Name substituted into instruction placeholders
    pub app_name: String,
    /// Manufacturer override applied at start-up (empty for none)
    pub test_manufacturer: String,
    /// ADB device ID (optional)
    pub device_id: String,
    /// Path to the adb executable
    pub adb_path: String,
    /// Dataset file replacing the bundled one (empty for bundled)
    pub data_path: String,
    /// Language code ("en" or "cn")
    pub lang: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            test_manufacturer: String::new(),
            device_id: String::new(),
            adb_path: "adb".to_string(),
            data_path: String::new(),
            lang: "en".to_string(),
        }
    }
}

impl AppSettings {
    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "moderras", "dontkillmyapp")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path.
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings from the config file and the process environment.
    pub fn load() -> Self {
        let file_settings = Self::settings_path()
            .map(|path| Self::from_file(&path))
            .unwrap_or_default();
        file_settings.with_env(std::env::vars())
    }

    /// Read settings from a file, using defaults if it is missing or invalid.
    pub fn from_file(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        let mut loaded: Self = match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        // Backfill required fields left blank in the file
        let defaults = Self::default();
        if loaded.app_name.trim().is_empty() {
            loaded.app_name = defaults.app_name;
        }
        if loaded.adb_path.trim().is_empty() {
            loaded.adb_path = defaults.adb_path;
        }
        if loaded.lang.trim().is_empty() {
            loaded.lang = defaults.lang;
        }

        loaded
    }

    /// Apply environment overrides from `(name, value)` pairs.
    pub fn with_env<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let get = |name: &str| vars.get(name).filter(|v| !v.trim().is_empty()).cloned();

        if let Some(value) = get(ENV_APP_NAME) {
            self.app_name = value;
        }
        if let Some(value) = get(ENV_MANUFACTURER) {
            self.test_manufacturer = value;
        }
        if let Some(value) = get(ENV_DEVICE_ID) {
            self.device_id = value;
        }
        if let Some(value) = get(ENV_ADB_PATH) {
            self.adb_path = value;
        }
        if let Some(value) = get(ENV_DATA_PATH) {
            self.data_path = value;
        }
        if let Some(value) = get(ENV_LANG) {
            self.lang = value;
        }

        self
    }

    /// The override to apply at start-up, if configured.
    pub fn test_manufacturer(&self) -> Option<&str> {
        Some(self.test_manufacturer.as_str()).filter(|v| !v.trim().is_empty())
    }

    pub fn device_id(&self) -> Option<&str> {
        Some(self.device_id.as_str()).filter(|v| !v.trim().is_empty())
    }

    pub fn data_path(&self) -> Option<&Path> {
        Some(self.data_path.as_str())
            .filter(|v| !v.trim().is_empty())
            .map(Path::new)
    }
}
