//! Reminder configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Period reminder timing
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    /// Days before the predicted period to remind
    #[serde(default = "default_lead_days")]
    pub lead_days: u32,

    /// How long the notification stays visible, in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl ReminderConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Validate reminder configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lead_days > 30 {
            return Err(ValidationError::InvalidLeadDays);
        }
        if self.duration_ms == 0 || self.duration_ms > 60_000 {
            return Err(ValidationError::InvalidReminderDuration);
        }
        Ok(())
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            lead_days: default_lead_days(),
            duration_ms: default_duration_ms(),
        }
    }
}

fn default_lead_days() -> u32 {
    3
}

fn default_duration_ms() -> u64 {
    5000
}
