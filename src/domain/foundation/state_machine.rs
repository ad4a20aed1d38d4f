//! State machine trait for lifecycle enums.
//!
//! Gives lifecycle enums (such as the controller's hydration state) one
//! consistent way to validate and perform transitions.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their valid transitions and get a validated
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// let next = HydrationState::Uninitialized.transition_to(HydrationState::Hydrating)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
