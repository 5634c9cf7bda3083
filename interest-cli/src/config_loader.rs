//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/interest/config.toml` on Linux,
//! `~/Library/Application Support/interest/config.toml` on macOS
//! or `%APPDATA%\interest\config.toml` on Windows.

use interest::builder::Build;
use interest::{InputPolicy, InterestConfig, InterestError};
use interest::currency::Currency;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Default currency label, as code or symbol (e.g. "USD", "रु").
    pub currency: Option<String>,
    /// "lenient" or "strict".
    pub input_policy: Option<String>,
    /// Rounding used for displayed amounts.
    pub decimal_places: Option<u32>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

impl CliConfig {
    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("interest"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Attempts to load configuration from the default config file location.
    /// Returns `CliConfig::default()` if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Saves the current configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Creates a sample configuration file at the default location.
    pub fn create_sample() -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;
        Self::sample().save_to(&path)?;
        Ok(path)
    }

    pub fn sample() -> Self {
        CliConfig {
            currency: Some("NPR".to_string()),
            input_policy: Some("lenient".to_string()),
            decimal_places: Some(2),
            enable_logging: Some(false),
        }
    }

    /// Converts the file settings into the library configuration.
    pub fn to_interest_config(&self) -> Result<InterestConfig, InterestError> {
        let mut builder = InterestConfig::builder();
        if let Some(raw) = &self.currency {
            let currency: Currency = raw
                .parse()
                .map_err(|_| InterestError::config(format!("Unknown currency '{}'", raw)))?;
            builder = builder.currency(currency);
        }
        if let Some(raw) = &self.input_policy {
            let policy: InputPolicy = raw
                .parse()
                .map_err(|_| InterestError::config(format!("Unknown input policy '{}'", raw)))?;
            builder = builder.input_policy(policy);
        }
        if let Some(dp) = self.decimal_places {
            builder = builder.decimal_places(dp);
        }
        builder.build()
    }
}
