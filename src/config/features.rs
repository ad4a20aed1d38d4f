//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Start first-time users on a sample profile
    #[serde(default = "default_true")]
    pub sample_data: bool,

    /// Send upcoming-period reminders
    #[serde(default = "default_true")]
    pub reminders: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            sample_data: true,
            reminders: true,
        }
    }
}

fn default_true() -> bool {
    true
}
