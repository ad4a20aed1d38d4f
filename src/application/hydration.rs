//! Startup lifecycle of the profile controller.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where the controller is in its one-shot startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationState {
    /// Serving the cached or default profile; the store has not been touched.
    Uninitialized,
    /// Initializing and reading the durable store.
    Hydrating,
    /// Loading finished; mutations write through to cache and store.
    Ready,
}

impl StateMachine for HydrationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use HydrationState::*;
        matches!((self, target), (Uninitialized, Hydrating) | (Hydrating, Ready))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use HydrationState::*;
        match self {
            Uninitialized => vec![Hydrating],
            Hydrating => vec![Ready],
            Ready => vec![],
        }
    }
}

impl fmt::Display for HydrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Hydrating => write!(f, "hydrating"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// How hydration resolved the durable store against the in-memory profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationOutcome {
    /// The store held a profile and it replaced the in-memory one.
    LoadedFromStore,
    /// The store was empty and was seeded with the in-memory profile.
    SeededStore,
    /// The store was empty and writing the seed failed. Later commits are
    /// still written to it.
    SeedFailed,
    /// The store could not be used; the cached profile stays in charge.
    StoreUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_moves_forward_only() {
        let hydrating = HydrationState::Uninitialized
            .transition_to(HydrationState::Hydrating)
            .unwrap();
        let ready = hydrating.transition_to(HydrationState::Ready).unwrap();
        assert_eq!(ready, HydrationState::Ready);
        assert!(ready.transition_to(HydrationState::Hydrating).is_err());
    }

    #[test]
    fn cannot_skip_hydrating() {
        assert!(HydrationState::Uninitialized
            .transition_to(HydrationState::Ready)
            .is_err());
    }

    #[test]
    fn ready_is_terminal() {
        assert!(HydrationState::Ready.is_terminal());
        assert!(!HydrationState::Uninitialized.is_terminal());
    }

    #[test]
    fn can_transition_agrees_with_valid_transitions() {
        use HydrationState::*;
        for from in [Uninitialized, Hydrating, Ready] {
            for to in [Uninitialized, Hydrating, Ready] {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }
}
