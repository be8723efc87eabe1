use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::model::Units;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Accra"
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key. Optional on disk; its absence surfaces as a
    /// recoverable fetch error, not a crash.
    pub api_key: Option<String>,

    /// City queried when geolocation fails and no city was given.
    pub default_city: Option<String>,

    /// Unit system for temperatures and wind speed.
    pub units: Option<Units>,
}

impl Config {
    /// API key with the environment override applied.
    pub fn resolved_api_key(&self) -> Option<String> {
        env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_no_key() {
        let cfg = Config::default();
        assert!(cfg.api_key.is_none());
        assert!(cfg.default_city.is_none());
    }

    #[test]
    fn stored_key_is_resolved() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        // Skipped when the override variable is set in the test environment.
        if env::var(API_KEY_ENV).is_err() {
            assert_eq!(cfg.resolved_api_key().as_deref(), Some("KEY"));
        }
    }

    #[test]
    fn units_round_trip_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            default_city: Some("Accra".into()),
            units: Some(Units::Imperial),
        };

        let text = toml::to_string_pretty(&cfg).expect("serializes");
        let back: Config = toml::from_str(&text).expect("parses");

        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.default_city.as_deref(), Some("Accra"));
        assert_eq!(back.units, Some(Units::Imperial));
    }

    #[test]
    fn missing_units_defaults_to_metric() {
        let cfg: Config = toml::from_str("api_key = \"KEY\"").expect("parses");
        assert_eq!(cfg.units.unwrap_or_default(), Units::Metric);
    }
}
