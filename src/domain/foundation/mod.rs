//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that form the vocabulary of the tracking domain.

pub mod calendar_date;
mod errors;
mod ids;
mod intensity;
mod state_machine;

pub use errors::ValidationError;
pub use ids::CycleId;
pub use intensity::Intensity;
pub use state_machine::StateMachine;
