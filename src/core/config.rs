//! Configuration management

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sensors: SensorConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("pcstats");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from disk, writing the defaults on first launch
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language: "auto", "en", "ru"
    #[serde(default = "default_language")]
    pub language: String,
    /// Relaunch as administrator on startup (Windows only, needed for most temperature sensors)
    #[serde(default)]
    pub run_as_admin: bool,
}

fn default_language() -> String { "auto".to_string() }
fn default_true() -> bool { true }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            run_as_admin: false,
        }
    }
}

/// Which hardware groups the sensor provider opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    #[serde(default = "default_true")]
    pub cpu_enabled: bool,
    #[serde(default = "default_true")]
    pub gpu_enabled: bool,
    #[serde(default = "default_true")]
    pub mainboard_enabled: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            cpu_enabled: true,
            gpu_enabled: true,
            mainboard_enabled: true,
        }
    }
}

/// Desktop window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Remember window position across launches
    #[serde(default = "default_true")]
    pub remember_position: bool,
    /// Saved window X position
    #[serde(default)]
    pub x: Option<f64>,
    /// Saved window Y position
    #[serde(default)]
    pub y: Option<f64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            remember_position: true,
            x: None,
            y: None,
        }
    }
}
