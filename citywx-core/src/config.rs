use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    assemble::AssemblerSettings,
    format::CoordinateStyle,
    model::{Locale, SnapshotShape, UnitPreference},
};

/// OpenWeather endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocode_url: String,
    pub weather_url: String,
    pub onecall_url: String,
    /// Icon URL template; `{icon}` is replaced with the condition icon code.
    pub icon_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode_url: "https://api.openweathermap.org/geo/1.0/direct".to_string(),
            weather_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            onecall_url: "https://api.openweathermap.org/data/3.0/onecall".to_string(),
            icon_url: "https://openweathermap.org/img/wn/{icon}@2x.png".to_string(),
        }
    }
}

impl Endpoints {
    /// All endpoints rooted at `base`, for pointing at a mock server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocode_url: format!("{base}/geo/1.0/direct"),
            weather_url: format!("{base}/data/2.5/weather"),
            onecall_url: format!("{base}/data/3.0/onecall"),
            icon_url: format!("{base}/img/wn/{{icon}}@2x.png"),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
/// shape = "flat"
/// coordinates = "minutes"
///
/// [endpoints]
/// geocode_url = "https://api.openweathermap.org/geo/1.0/direct"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub units: UnitPreference,
    pub shape: SnapshotShape,
    pub coordinates: CoordinateStyle,
    pub locale: Locale,
    pub endpoints: Endpoints,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citywx", "citywx")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Presentation options handed to the assembler.
    pub fn assembler_settings(&self) -> AssemblerSettings {
        AssemblerSettings {
            locale: self.locale.clone(),
            coordinate_style: self.coordinates,
            icon_url: self.endpoints.icon_url.clone(),
        }
    }
}
