//! Tracking module - the user profile, cycle history and predictions.

mod cycle;
mod entries;
pub mod prediction;
mod profile;
mod sample;

pub use cycle::{CycleData, NewCycle};
pub use entries::{Mood, MoodKind, Symptom, SymptomKind};
pub use prediction::{
    cycle_day, cycle_stats, fertile_window, recompute, CycleLengthPolicy, CycleStats,
    FertileWindow, PredictionSettings,
};
pub use profile::{
    ProfilePatch, UserProfile, DEFAULT_CYCLE_LENGTH, DEFAULT_LUTEAL_PHASE_LENGTH,
    DEFAULT_PERIOD_LENGTH,
};
pub use sample::sample_profile;
