//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Store and cache must use different files")]
    StoreAndCacheCollide,

    #[error("Prediction history window must be at least 2 cycles")]
    HistoryWindowTooSmall,

    #[error("Reminder lead time must be between 0 and 30 days")]
    InvalidLeadDays,

    #[error("Reminder duration must be between 1 and 60000 ms")]
    InvalidReminderDuration,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
