//! Configuration module
//!
//! Settings come from a TOML file, by default
//! `~/.config/fleet-ledger/config.toml`. A missing file yields the defaults;
//! every key is optional.
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! format = "pretty"   # pretty or json
//!
//! [ledger]
//! seed_demo_data = true
//! event_capacity = 1024
//! license_warning_days = 60
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::events::DEFAULT_CAPACITY;
use crate::application::ledger::DEFAULT_LICENSE_WARNING_DAYS;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "FLEET_LEDGER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Start from the demo fleet instead of an empty ledger
    pub seed_demo_data: bool,
    /// Events buffered per subscriber before the oldest are skipped
    pub event_capacity: usize,
    /// Licenses expiring within this many days are flagged
    pub license_warning_days: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            event_capacity: DEFAULT_CAPACITY,
            license_warning_days: DEFAULT_LICENSE_WARNING_DAYS,
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, raw).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.format.to_lowercase().as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::Invalid {
                    field: "logging.format",
                    reason: format!("expected \"pretty\" or \"json\", got {other:?}"),
                })
            }
        }
        if self.ledger.event_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "ledger.event_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.ledger.license_warning_days < 0 {
            return Err(ConfigError::Invalid {
                field: "ledger.license_warning_days",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// `$FLEET_LEDGER_CONFIG`, else `~/.config/fleet-ledger/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleet-ledger")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.ledger.seed_demo_data);
        assert_eq!(config.ledger.license_warning_days, 60);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ledger]\nseed_demo_data = false\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert!(!config.ledger.seed_demo_data);
        assert_eq!(config.ledger.event_capacity, DEFAULT_CAPACITY);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.logging.format = "json".into();
        config.ledger.license_warning_days = 14;

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid { field: "logging.format", .. })
        ));

        std::fs::write(&path, "[ledger]\nevent_capacity = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid { .. })
        ));

        std::fs::write(&path, "not toml = = =").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
