//! ProfileController - owner of the canonical in-memory profile.
//!
//! Every mutation is computed into a full replacement profile and committed
//! in one step. A commit then:
//! 1. mirrors the profile to the cache (synchronously),
//! 2. queues it for the durable store (fire-and-forget),
//! 3. re-checks the reminder if the predicted next period moved.
//!
//! Subscribers created with [`ProfileController::subscribe`] see each
//! committed profile.

use chrono::NaiveDate;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;

use super::hydration::{HydrationOutcome, HydrationState};
use super::persistence::PersistenceWriter;
use super::reminder::{ReminderNotifier, ReminderSettings};
use crate::domain::foundation::{CycleId, StateMachine, ValidationError};
use crate::domain::tracking::{
    cycle_day, cycle_stats, fertile_window, recompute, sample_profile, CycleStats, FertileWindow,
    Mood, NewCycle, PredictionSettings, ProfilePatch, Symptom, UserProfile,
};
use crate::ports::{Clock, Notifier, ProfileCache, ProfileStore, StoreError};

/// Errors surfaced by the controller itself. Store and cache failures are
/// logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Profile controller requires a Tokio runtime: {0}")]
    NoRuntime(String),

    #[error("Invalid lifecycle transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error("Failed to export profile: {0}")]
    Export(String),
}

/// Why an import was rejected. The current profile is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Import is not a well-formed profile document: {0}")]
    Malformed(String),

    #[error("Imported profile is invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// Collaborators the controller talks to.
#[derive(Clone)]
pub struct ControllerDeps {
    pub store: Arc<dyn ProfileStore>,
    pub cache: Arc<dyn ProfileCache>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

/// Behaviour switches for the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerSettings {
    pub prediction: PredictionSettings,
    pub reminder: ReminderSettings,
    /// Start first-time users on a sample profile instead of an empty one.
    pub sample_data: bool,
}

pub struct ProfileController {
    state: watch::Sender<UserProfile>,
    lifecycle: Mutex<HydrationState>,
    store: Arc<dyn ProfileStore>,
    cache: Arc<dyn ProfileCache>,
    clock: Arc<dyn Clock>,
    reminder: ReminderNotifier,
    prediction: PredictionSettings,
    writer: PersistenceWriter,
}

impl ProfileController {
    /// Builds the controller around the cached profile (or a fresh one) and
    /// starts the persistence writer on the current Tokio runtime.
    ///
    /// The durable store is not touched until [`hydrate`](Self::hydrate).
    pub fn new(deps: ControllerDeps, settings: ControllerSettings) -> Result<Self, ControllerError> {
        let runtime = Handle::try_current().map_err(|e| ControllerError::NoRuntime(e.to_string()))?;

        let initial = match deps.cache.load() {
            Ok(Some(profile)) => match profile.validate() {
                Ok(()) => profile,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring inconsistent cached profile");
                    Self::fresh_profile(&deps, &settings)
                }
            },
            Ok(None) => Self::fresh_profile(&deps, &settings),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable cached profile");
                Self::fresh_profile(&deps, &settings)
            }
        };

        let (state, _) = watch::channel(initial);

        Ok(Self {
            state,
            lifecycle: Mutex::new(HydrationState::Uninitialized),
            writer: PersistenceWriter::spawn(deps.store.clone(), &runtime),
            reminder: ReminderNotifier::new(deps.notifier, deps.clock.clone(), settings.reminder),
            store: deps.store,
            cache: deps.cache,
            clock: deps.clock,
            prediction: settings.prediction,
        })
    }

    fn fresh_profile(deps: &ControllerDeps, settings: &ControllerSettings) -> UserProfile {
        let profile = if settings.sample_data {
            recompute(&sample_profile(deps.clock.today()), &settings.prediction)
        } else {
            UserProfile::default()
        };
        if let Err(e) = deps.cache.store(&profile) {
            tracing::warn!(error = %e, "failed to mirror initial profile to cache");
        }
        profile
    }

    // === Queries ===

    /// Snapshot of the current profile.
    pub fn profile(&self) -> UserProfile {
        self.state.borrow().clone()
    }

    /// Receiver that observes every committed profile.
    pub fn subscribe(&self) -> watch::Receiver<UserProfile> {
        self.state.subscribe()
    }

    pub fn hydration_state(&self) -> HydrationState {
        *self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True until hydration has finished.
    pub fn is_loading(&self) -> bool {
        self.hydration_state() != HydrationState::Ready
    }

    /// Days of the current period, empty without a known period start.
    pub fn current_period_dates(&self) -> Vec<NaiveDate> {
        self.state.borrow().current_period_dates()
    }

    pub fn fertile_window(&self) -> Option<FertileWindow> {
        fertile_window(&self.state.borrow())
    }

    pub fn cycle_stats(&self) -> CycleStats {
        cycle_stats(self.state.borrow().cycle_history())
    }

    /// Day of the current cycle according to the clock.
    pub fn cycle_day(&self) -> Option<u32> {
        cycle_day(&self.state.borrow(), self.clock.today())
    }

    // === Mutations ===

    /// Shallow-merges `patch` into the profile and recomputes predictions.
    pub fn update_profile(&self, patch: ProfilePatch) -> UserProfile {
        let settings = self.prediction;
        self.commit(move |current| recompute(&current.apply(patch), &settings))
    }

    /// Records a new cycle under a fresh id and makes it the last known period.
    pub fn add_cycle(&self, cycle: NewCycle) -> UserProfile {
        let settings = self.prediction;
        self.commit(move |current| recompute(&current.with_cycle(CycleId::new(), cycle), &settings))
    }

    /// Logs a mood against the most recently recorded cycle. No-op without cycles.
    pub fn add_mood(&self, mood: Mood) -> UserProfile {
        self.commit(move |current| current.with_mood(mood))
    }

    /// Logs a symptom against the most recently recorded cycle. No-op without cycles.
    pub fn add_symptom(&self, symptom: Symptom) -> UserProfile {
        self.commit(move |current| current.with_symptom(symptom))
    }

    /// Serializes the whole profile as a JSON document.
    pub fn export_data(&self) -> Result<String, ControllerError> {
        serde_json::to_string(&*self.state.borrow()).map_err(|e| ControllerError::Export(e.to_string()))
    }

    /// Replaces the whole profile with an exported document.
    ///
    /// The document is taken as-is (predictions are not recomputed) so an
    /// export followed by an import restores the exact same profile.
    pub fn import_data(&self, data: &str) -> Result<UserProfile, ImportError> {
        let imported = serde_json::from_str::<UserProfile>(data)
            .map_err(|e| ImportError::Malformed(e.to_string()))
            .and_then(|profile| {
                profile.validate()?;
                Ok(profile)
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "rejected profile import");
                e
            })?;

        tracing::info!(cycles = imported.cycle_history().len(), "profile imported");
        Ok(self.commit(move |_| imported))
    }

    /// Waits for every durable write queued so far.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    // === Startup ===

    /// Runs the one-shot startup sequence against the durable store.
    ///
    /// A stored profile replaces the in-memory one; an empty store is seeded
    /// with it; an unusable store is logged and ignored. Calling this twice
    /// is an error.
    pub async fn hydrate(&self) -> Result<HydrationOutcome, ControllerError> {
        self.transition(HydrationState::Hydrating)?;

        let outcome = match self.store.initialize().await {
            Err(e) => {
                tracing::warn!(error = %e, "durable store unavailable; using cached profile");
                HydrationOutcome::StoreUnavailable
            }
            Ok(()) => match self.store.read_profile().await {
                Ok(Some(stored)) => match stored.validate() {
                    Ok(()) => {
                        self.commit(move |_| stored);
                        self.writer.enable();
                        HydrationOutcome::LoadedFromStore
                    }
                    Err(e) => {
                        // Same as an unreadable store: keep it, do not overwrite it
                        tracing::warn!(error = %e, "stored profile is inconsistent; using cached profile");
                        HydrationOutcome::StoreUnavailable
                    }
                },
                Ok(None) => match self.seed_store().await {
                    Ok(()) => HydrationOutcome::SeededStore,
                    Err(e) => {
                        tracing::warn!(error = %e, "durable store could not be seeded");
                        HydrationOutcome::SeedFailed
                    }
                },
                Err(e) => {
                    // Leave an unreadable store alone rather than overwrite it
                    tracing::warn!(error = %e, "failed to read stored profile; using cached profile");
                    HydrationOutcome::StoreUnavailable
                }
            },
        };

        self.transition(HydrationState::Ready)?;
        tracing::info!(?outcome, "profile hydration complete");
        let prediction = self.state.borrow().next_period_prediction();
        self.reminder.evaluate(prediction);
        Ok(outcome)
    }

    /// Queues the current profile as the store's first write, under the
    /// channel lock so that it lands before any later commit.
    async fn seed_store(&self) -> Result<(), StoreError> {
        let mut pending = None;
        self.state.send_if_modified(|current| {
            pending = Some(self.writer.seed(current.clone()));
            false
        });
        match pending {
            Some(result) => result
                .await
                .unwrap_or_else(|_| Err(StoreError::Unavailable("persistence writer stopped".to_string()))),
            None => Err(StoreError::Unavailable("seed was not queued".to_string())),
        }
    }

    fn transition(&self, target: HydrationState) -> Result<(), ControllerError> {
        let mut lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        *lifecycle = lifecycle.transition_to(target)?;
        tracing::debug!(state = %*lifecycle, "profile controller lifecycle");
        Ok(())
    }

    /// Single commit path for every mutation.
    ///
    /// The channel's write lock is held while the replacement is computed,
    /// mirrored and queued, so concurrent mutations are serialized and the
    /// store receives snapshots in commit order.
    fn commit<F>(&self, mutate: F) -> UserProfile
    where
        F: FnOnce(&UserProfile) -> UserProfile,
    {
        let mut committed = None;
        let mut previous_prediction = None;

        let changed = self.state.send_if_modified(|current| {
            let next = mutate(current);
            if next == *current {
                return false;
            }
            previous_prediction = current.next_period_prediction();
            if let Err(e) = self.cache.store(&next) {
                tracing::warn!(error = %e, "failed to mirror profile to cache");
            }
            self.writer.enqueue(next.clone());
            *current = next;
            committed = Some(current.clone());
            true
        });

        let profile = match committed {
            Some(profile) => profile,
            None => self.profile(),
        };

        if changed && profile.next_period_prediction() != previous_prediction {
            self.reminder.evaluate(profile.next_period_prediction());
        }
        profile
    }
}
