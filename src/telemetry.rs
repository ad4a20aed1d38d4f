//! Structured logging setup
//!
//! Builds a `tracing` subscriber from [`LoggingConfig`]. `RUST_LOG`, when set,
//! replaces the configured filter directive.

use std::env;
use std::io;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Builds the filter, preferring `RUST_LOG` over the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    let directive = env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());
    EnvFilter::try_new(&directive).map_err(|e| TelemetryError::InvalidFilter(e.to_string()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stdout))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(io::stdout))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_writer(io::stdout))
            .try_init(),
    };
    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    info!(
        service.version = env!("CARGO_PKG_VERSION"),
        log.level = %config.level,
        log.format = ?config.format,
        "PeriodPal starting up"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_builds_a_filter() {
        if env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(env_filter(&LoggingConfig::default()).is_ok());
    }

    #[test]
    fn second_init_reports_already_initialized() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        };
        let _ = init(&config);
        assert!(matches!(
            init(&config),
            Err(TelemetryError::AlreadyInitialized(_)) | Err(TelemetryError::InvalidFilter(_))
        ));
    }
}
