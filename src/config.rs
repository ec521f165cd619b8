//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::onboarding::model::storage_keys;

/// Where the applicant snapshot is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Lost when the process exits.
    Memory,
    /// `<data_dir>/<key>.json`.
    File,
    /// `<data_dir>/onboarding.db`.
    LibSql,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "libsql" => Ok(Self::LibSql),
            other => Err(format!("expected memory, file or libsql, got '{other}'")),
        }
    }
}

/// Wizard configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub storage: StorageBackend,
    /// Directory for the JSON file or libSQL database.
    pub data_dir: PathBuf,
    /// The single key the profile snapshot is stored under.
    pub storage_key: String,
    /// Delay between the last keystroke and field validation.
    pub debounce: Duration,
    /// Directory for the rolling log file.
    pub log_dir: PathBuf,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
            storage_key: storage_keys::APPLICANT_PROFILE.to_string(),
            debounce: Duration::from_millis(300),
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl WizardConfig {
    /// Read `ONBOARDING_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Build from any variable source. Unset or empty variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("ONBOARDING_STORAGE") {
            config.storage = raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "ONBOARDING_STORAGE".to_string(),
                message,
            })?;
        }
        if let Some(raw) = get("ONBOARDING_DATA_DIR") {
            config.data_dir = PathBuf::from(raw);
        }
        if let Some(raw) = get("ONBOARDING_STORAGE_KEY") {
            config.storage_key = raw;
        }
        if let Some(raw) = get("ONBOARDING_DEBOUNCE_MS") {
            let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "ONBOARDING_DEBOUNCE_MS".to_string(),
                message: format!("'{raw}' is not a number of milliseconds: {e}"),
            })?;
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(raw) = get("ONBOARDING_LOG_DIR") {
            config.log_dir = PathBuf::from(raw);
        }

        Ok(config)
    }

    /// Path of the libSQL database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("onboarding.db")
    }
}
