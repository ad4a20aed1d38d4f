//! Prediction configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::tracking::{CycleLengthPolicy, PredictionSettings};

/// How predictions are computed
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    /// `historical` (default) or `static`
    #[serde(default)]
    pub cycle_length_policy: CycleLengthPolicy,

    /// Recent cycles considered by the historical policy
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl PredictionConfig {
    pub fn settings(&self) -> PredictionSettings {
        PredictionSettings {
            policy: self.cycle_length_policy,
            history_window: self.history_window,
        }
    }

    /// Validate prediction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window < 2 {
            return Err(ValidationError::HistoryWindowTooSmall);
        }
        Ok(())
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            cycle_length_policy: CycleLengthPolicy::default(),
            history_window: default_history_window(),
        }
    }
}

fn default_history_window() -> usize {
    6
}
