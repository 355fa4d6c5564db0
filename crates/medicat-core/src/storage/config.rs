//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Due-window bounds (how early and how late a dose is shown)
//! - Refresh cadence for the due-dose watcher
//! - Defaults offered when adding a medicine
//! - Storage location override
//!
//! Configuration is stored at `~/.config/medicat/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::medicine::{Icon, ScheduleTime};
use crate::relevance::DueWindow;

/// Largest accepted lead or grace period: one day.
const MAX_WINDOW_MINUTES: u32 = 24 * 60;

/// Due-window configuration, in minutes around the scheduled time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueWindowConfig {
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: u32,
    #[serde(default = "default_grace_minutes")]
    pub grace_minutes: u32,
}

/// Refresh cadence for `watch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

/// Values pre-filled when adding a medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedicineConfig {
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_time")]
    pub time: String,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file. Empty means `<data dir>/medicat.db`.
    #[serde(default)]
    pub database: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/medicat/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub due_window: DueWindowConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub new_medicine: NewMedicineConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_lead_minutes() -> u32 {
    60
}
fn default_grace_minutes() -> u32 {
    120
}
fn default_interval_secs() -> u64 {
    5
}
fn default_icon() -> String {
    Icon::default().symbol().into()
}
fn default_time() -> String {
    ScheduleTime::DEFAULT_FIRST_DOSE.to_string()
}

impl Default for DueWindowConfig {
    fn default() -> Self {
        Self {
            lead_minutes: default_lead_minutes(),
            grace_minutes: default_grace_minutes(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for NewMedicineConfig {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            time: default_time(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. Returns error if the key is
    /// unknown or the resulting config is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, minutes) in [
            ("due_window.lead_minutes", self.due_window.lead_minutes),
            ("due_window.grace_minutes", self.due_window.grace_minutes),
        ] {
            if minutes > MAX_WINDOW_MINUTES {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be at most {MAX_WINDOW_MINUTES} minutes"),
                });
            }
        }
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "refresh.interval_secs".into(),
                message: "must be at least 1".into(),
            });
        }
        self.new_medicine
            .icon
            .parse::<Icon>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "new_medicine.icon".into(),
                message: e.to_string(),
            })?;
        self.new_medicine
            .time
            .parse::<ScheduleTime>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "new_medicine.time".into(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Due window in minutes, capped at one day on each side.
    pub fn due_window(&self) -> DueWindow {
        let bounded = |minutes: u32| {
            i32::try_from(minutes.min(MAX_WINDOW_MINUTES)).unwrap_or(MAX_WINDOW_MINUTES as i32)
        };
        DueWindow {
            lead_minutes: bounded(self.due_window.lead_minutes),
            grace_minutes: bounded(self.due_window.grace_minutes),
        }
    }

    pub fn default_icon(&self) -> Icon {
        self.new_medicine.icon.parse().unwrap_or_default()
    }

    pub fn default_time(&self) -> ScheduleTime {
        self.new_medicine
            .time
            .parse()
            .unwrap_or(ScheduleTime::DEFAULT_FIRST_DOSE)
    }

    /// Database file to open: the configured path, or `<data dir>/medicat.db`.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if self.storage.database.trim().is_empty() {
            Ok(data_dir()?.join("medicat.db"))
        } else {
            Ok(PathBuf::from(self.storage.database.trim()))
        }
    }
}
