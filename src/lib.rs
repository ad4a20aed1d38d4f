//! PeriodPal - menstrual cycle tracking core
//!
//! Holds the user's cycle profile, derives period and fertility predictions
//! from it, keeps it in sync with a durable store and a fast local cache, and
//! reminds the user ahead of the next predicted period.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
