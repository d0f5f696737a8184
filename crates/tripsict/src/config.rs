//! Configuration management for tripsict.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "tripsict";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "tripsict.db";

/// Longest lookahead window accepted for notifications.
const MAX_LOOKAHEAD_DAYS: u32 = 365;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRIPSICT_`)
/// 2. TOML config file at `~/.config/tripsict/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Notification configuration.
    pub notifications: NotificationConfig,
    /// Flight input configuration.
    pub flights: FlightConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/tripsict/tripsict.db`
    pub database_path: Option<PathBuf>,
}

/// Upcoming-trip notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Show notifications at all.
    pub enabled: bool,
    /// How many days ahead a trip starts triggering a notification.
    pub lookahead_days: u32,
}

/// Flight input configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Pattern a flight number must match (regex).
    pub flight_number_pattern: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lookahead_days: 7,
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            // Two-character carrier code followed by up to four digits
            flight_number_pattern: r"^[A-Z0-9]{2}[A-Z]?\s?\d{1,4}[A-Z]?$".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the TOML file at
    /// `config_path` instead of the default location when given.
    ///
    /// Later sources override earlier ones: defaults, then the TOML file
    /// (if it exists), then `TRIPSICT_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("TRIPSICT_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.notifications.lookahead_days > MAX_LOOKAHEAD_DAYS {
            return Err(Error::ConfigValidation {
                message: format!(
                    "lookahead_days ({}) cannot be greater than {MAX_LOOKAHEAD_DAYS}",
                    self.notifications.lookahead_days
                ),
            });
        }

        if Regex::new(&self.flights.flight_number_pattern).is_err() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "invalid regex pattern: {}",
                    self.flights.flight_number_pattern
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Compile the flight number pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regex.
    pub fn flight_number_regex(&self) -> Result<Regex> {
        Regex::new(&self.flights.flight_number_pattern).map_err(|e| Error::ConfigValidation {
            message: format!("invalid regex pattern: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.lookahead_days, 7);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_lookahead_too_long() {
        let mut config = Config::default();
        config.notifications.lookahead_days = 400;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("lookahead_days"));
    }

    #[test]
    fn test_validate_invalid_regex() {
        let mut config = Config::default();
        config.flights.flight_number_pattern = "[invalid".to_string();

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid regex"));
    }

    #[test]
    fn test_default_flight_number_pattern() {
        let re = Config::default().flight_number_regex().unwrap();
        assert!(re.is_match("UA123"));
        assert!(re.is_match("BA 2490"));
        assert!(re.is_match("EZY8712"));
        assert!(!re.is_match("hello"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("tripsict.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("tripsict"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "tripsict_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[notifications]\nlookahead_days = 3\n\n[storage]\ndatabase_path = \"/tmp/trips.db\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.notifications.lookahead_days, 3);
        assert!(config.notifications.enabled);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/trips.db"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_notification_config_deserialize() {
        let json = r#"{"lookahead_days": 14}"#;
        let notifications: NotificationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(notifications.lookahead_days, 14);
        assert!(notifications.enabled);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
