//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) using the `config` and `dotenvy` crates. Variables carry the
//! `PERIODPAL` prefix and nested values are separated by `__`. Every section
//! has defaults, so an empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use periodpal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Profile stored at {}", config.storage.store_path().display());
//! ```

mod error;
mod features;
mod logging;
mod prediction;
mod reminder;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::{LogFormat, LoggingConfig};
pub use prediction::PredictionConfig;
pub use reminder::ReminderConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

use crate::application::{ControllerSettings, ReminderSettings};

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Store and cache file locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cycle length policy and history window
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Reminder lead time and display duration
    #[serde(default)]
    pub reminder: ReminderConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `PERIODPAL__STORAGE__DATA_DIR=/var/lib/periodpal` -> `storage.data_dir`
    /// - `PERIODPAL__PREDICTION__CYCLE_LENGTH_POLICY=static` -> `prediction.cycle_length_policy`
    /// - `PERIODPAL__FEATURES__SAMPLE_DATA=false` -> `features.sample_data`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERIODPAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.prediction.validate()?;
        self.reminder.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Settings handed to the profile controller
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            prediction: self.prediction.settings(),
            reminder: ReminderSettings {
                enabled: self.features.reminders,
                lead_days: self.reminder.lead_days,
                duration: self.reminder.duration(),
            },
            sample_data: self.features.sample_data,
        }
    }
}
