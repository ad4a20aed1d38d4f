//! Application layer - the profile controller and its collaborators.
//!
//! The controller owns the canonical profile, routes every mutation through
//! one commit path, and coordinates hydration, persistence and reminders
//! through the ports.

mod hydration;
mod persistence;
mod profile_controller;
mod reminder;

pub use hydration::{HydrationOutcome, HydrationState};
pub use profile_controller::{
    ControllerDeps, ControllerError, ControllerSettings, ImportError, ProfileController,
};
pub use reminder::{reminder_message, ReminderNotifier, ReminderSettings, REMINDER_TITLE};
