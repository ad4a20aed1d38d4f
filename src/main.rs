//! PeriodPal entry point
//!
//! Loads configuration, hydrates the profile from the durable store and logs
//! the current predictions.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use periodpal::adapters::{FileProfileStore, JsonFileProfileCache, SystemClock, TracingNotifier};
use periodpal::application::{ControllerDeps, ControllerError, ProfileController};
use periodpal::config::{AppConfig, ConfigError};
use periodpal::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error(transparent)]
    Controller(#[from] ControllerError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init(&config.logging)?;

    let deps = ControllerDeps {
        store: Arc::new(FileProfileStore::new(config.storage.store_path())),
        cache: Arc::new(JsonFileProfileCache::new(config.storage.cache_path())),
        notifier: Arc::new(TracingNotifier::new()),
        clock: Arc::new(SystemClock),
    };
    let controller = ProfileController::new(deps, config.controller_settings())?;
    let outcome = controller.hydrate().await?;

    let profile = controller.profile();
    let stats = controller.cycle_stats();
    info!(
        ?outcome,
        name = profile.name(),
        cycles = stats.total_cycles,
        average_cycle_length = profile.average_cycle_length(),
        next_period = ?profile.next_period_prediction(),
        cycle_day = ?controller.cycle_day(),
        "profile ready"
    );
    if let Some(window) = controller.fertile_window() {
        info!(
            start = %window.start,
            end = %window.end,
            ovulation_day = %window.ovulation_day,
            "fertile window"
        );
    }

    controller.flush().await;
    Ok(())
}
