//! Core error types for medicat-core.
//!
//! This module defines the error hierarchy using thiserror. Store failures,
//! validation failures and configuration failures each get their own enum;
//! [`CoreError`] wraps them for callers that drive whole operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for medicat-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Durable store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An intake already exists for this dose on this day
    #[error("Dose {scheduled_time} of medicine '{medicine_id}' already taken on {date}")]
    AlreadyTaken {
        medicine_id: String,
        scheduled_time: String,
        date: chrono::NaiveDate,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`KvStore`](crate::storage::KvStore) or by decoding its values.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be read or written
    #[error("Store unavailable for key '{key}': {message}")]
    Unavailable { key: String, message: String },

    /// The stored value is not valid JSON for the expected shape
    #[error("Corrupt value under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded before writing
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn unavailable(key: &str, message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors for medicine drafts and user-supplied values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Medicine name must not be empty")]
    EmptyName,

    #[error("At least one schedule time is required")]
    NoScheduleTimes,

    #[error("At least one active day is required")]
    NoActiveDays,

    #[error("Repeat cadence must be at least 1 week, got {0}")]
    InvalidRepeatWeeks(u32),

    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),

    #[error("Icon '{0}' is not in the palette")]
    InvalidIcon(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable {
            key: String::new(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
