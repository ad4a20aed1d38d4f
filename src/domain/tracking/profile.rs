//! UserProfile aggregate root and its patch type.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::cycle::{CycleData, NewCycle};
use super::entries::{Mood, Symptom};
use crate::domain::foundation::{calendar_date, CycleId, ValidationError};

/// Cycle length assumed for a brand new profile.
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Period length assumed for a brand new profile, and when a stored length is zero.
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Luteal phase length assumed when the profile does not set one.
pub const DEFAULT_LUTEAL_PHASE_LENGTH: u32 = 14;

pub(super) const MAX_CYCLE_LENGTH: u32 = 365;
const MAX_PERIOD_LENGTH: u32 = 60;
const MAX_LUTEAL_PHASE_LENGTH: u32 = 60;

/// The single tracked user and their cycle history.
///
/// `next_period_prediction` can only be written by the prediction engine;
/// every other change goes through [`ProfilePatch`] or the append helpers,
/// each of which returns a new value and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    name: String,
    average_cycle_length: u32,
    average_period_length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    luteal_phase_length: Option<u32>,
    #[serde(default, with = "calendar_date::option")]
    last_period_start: Option<NaiveDate>,
    #[serde(default, with = "calendar_date::option")]
    last_period_end: Option<NaiveDate>,
    #[serde(default, with = "calendar_date::option")]
    next_period_prediction: Option<NaiveDate>,
    #[serde(default)]
    cycle_history: Vec<CycleData>,
}

impl UserProfile {
    /// Creates an empty profile with default cycle settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            average_cycle_length: DEFAULT_CYCLE_LENGTH,
            average_period_length: DEFAULT_PERIOD_LENGTH,
            luteal_phase_length: None,
            last_period_start: None,
            last_period_end: None,
            next_period_prediction: None,
            cycle_history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn average_cycle_length(&self) -> u32 {
        self.average_cycle_length
    }

    pub fn average_period_length(&self) -> u32 {
        self.average_period_length
    }

    pub fn luteal_phase_length(&self) -> Option<u32> {
        self.luteal_phase_length
    }

    /// Luteal phase length, falling back to the textbook 14 days.
    pub fn effective_luteal_phase_length(&self) -> u32 {
        self.luteal_phase_length
            .unwrap_or(DEFAULT_LUTEAL_PHASE_LENGTH)
    }

    pub fn last_period_start(&self) -> Option<NaiveDate> {
        self.last_period_start
    }

    pub fn last_period_end(&self) -> Option<NaiveDate> {
        self.last_period_end
    }

    pub fn next_period_prediction(&self) -> Option<NaiveDate> {
        self.next_period_prediction
    }

    /// Cycles in the order they were recorded (not necessarily by date).
    pub fn cycle_history(&self) -> &[CycleData] {
        &self.cycle_history
    }

    /// The most recently recorded cycle, which receives new log entries.
    pub fn current_cycle(&self) -> Option<&CycleData> {
        self.cycle_history.last()
    }

    /// Shallow merge: every field present in the patch replaces the current value.
    ///
    /// The merge is total: the result is brought back within the rules
    /// [`validate`](Self::validate) enforces (see [`normalized`](Self::normalized)).
    pub fn apply(&self, patch: ProfilePatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(length) = patch.average_cycle_length {
            next.average_cycle_length = length;
        }
        if let Some(length) = patch.average_period_length {
            next.average_period_length = length;
        }
        if let Some(length) = patch.luteal_phase_length {
            next.luteal_phase_length = length;
        }
        if let Some(start) = patch.last_period_start {
            next.last_period_start = start;
        }
        if let Some(end) = patch.last_period_end {
            next.last_period_end = end;
        }
        if let Some(history) = patch.cycle_history {
            next.cycle_history = history;
        }
        next.normalized()
    }

    /// Appends a cycle and makes it the last known period.
    ///
    /// An end date before the start is dropped, leaving the period open.
    pub fn with_cycle(&self, id: CycleId, cycle: NewCycle) -> Self {
        let mut next = self.clone();
        let cycle = CycleData::from_new(id, cycle);
        next.last_period_start = Some(cycle.start_date);
        next.last_period_end = cycle.end_date;
        next.cycle_history.push(cycle);
        next.normalized()
    }

    /// Clamps lengths into range, drops end dates that precede their start
    /// (an open period) and gives blank or repeated cycle ids a fresh id.
    ///
    /// A normalized profile always passes [`validate`](Self::validate).
    pub fn normalized(mut self) -> Self {
        self.average_cycle_length = self.average_cycle_length.clamp(1, MAX_CYCLE_LENGTH);
        self.average_period_length = self.average_period_length.min(MAX_PERIOD_LENGTH);
        self.luteal_phase_length = self
            .luteal_phase_length
            .map(|length| length.clamp(1, MAX_LUTEAL_PHASE_LENGTH));

        if let (Some(start), Some(end)) = (self.last_period_start, self.last_period_end) {
            if end < start {
                self.last_period_end = None;
            }
        }

        let mut seen = HashSet::new();
        for cycle in &mut self.cycle_history {
            if cycle.end_date.is_some_and(|end| end < cycle.start_date) {
                cycle.end_date = None;
            }
            if cycle.id.as_str().trim().is_empty() || seen.contains(&cycle.id) {
                cycle.id = CycleId::new();
            }
            seen.insert(cycle.id.clone());
        }
        self
    }

    /// Appends a mood to the current cycle. Without any cycle the mood is dropped.
    pub fn with_mood(&self, mood: Mood) -> Self {
        let mut next = self.clone();
        if let Some(cycle) = next.cycle_history.last_mut() {
            cycle.moods.push(mood);
        }
        next
    }

    /// Appends a symptom to the current cycle. Without any cycle the symptom is dropped.
    pub fn with_symptom(&self, symptom: Symptom) -> Self {
        let mut next = self.clone();
        if let Some(cycle) = next.cycle_history.last_mut() {
            cycle.symptoms.push(symptom);
        }
        next
    }

    /// Days of the current period: `last_period_start` onwards for the
    /// average period length. Empty without a known period start.
    pub fn current_period_dates(&self) -> Vec<NaiveDate> {
        let Some(start) = self.last_period_start else {
            return Vec::new();
        };
        let length = match self.average_period_length {
            0 => DEFAULT_PERIOD_LENGTH,
            length => length,
        };
        (0..u64::from(length))
            .map_while(|offset| start.checked_add_days(Days::new(offset)))
            .collect()
    }

    pub(super) fn set_average_cycle_length(&mut self, length: u32) {
        self.average_cycle_length = length;
    }

    pub(super) fn set_next_period_prediction(&mut self, prediction: Option<NaiveDate>) {
        self.next_period_prediction = prediction;
    }

    /// Checks the profile is internally consistent. Run on imported data.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_CYCLE_LENGTH).contains(&self.average_cycle_length) {
            return Err(ValidationError::out_of_range(
                "averageCycleLength",
                1,
                i64::from(MAX_CYCLE_LENGTH),
                i64::from(self.average_cycle_length),
            ));
        }
        if self.average_period_length > MAX_PERIOD_LENGTH {
            return Err(ValidationError::out_of_range(
                "averagePeriodLength",
                0,
                i64::from(MAX_PERIOD_LENGTH),
                i64::from(self.average_period_length),
            ));
        }
        if let Some(luteal) = self.luteal_phase_length {
            if !(1..=MAX_LUTEAL_PHASE_LENGTH).contains(&luteal) {
                return Err(ValidationError::out_of_range(
                    "lutealPhaseLength",
                    1,
                    i64::from(MAX_LUTEAL_PHASE_LENGTH),
                    i64::from(luteal),
                ));
            }
        }
        if let (Some(start), Some(end)) = (self.last_period_start, self.last_period_end) {
            if end < start {
                return Err(ValidationError::invalid_format(
                    "lastPeriodEnd",
                    "precedes lastPeriodStart",
                ));
            }
        }

        let mut seen = HashSet::new();
        for cycle in &self.cycle_history {
            if cycle.id.as_str().trim().is_empty() {
                return Err(ValidationError::empty_field("cycleHistory.id"));
            }
            if !seen.insert(cycle.id.as_str()) {
                return Err(ValidationError::duplicate("cycleHistory.id", cycle.id.as_str()));
            }
            if cycle.end_date.is_some_and(|end| end < cycle.start_date) {
                return Err(ValidationError::invalid_format(
                    "cycleHistory.endDate",
                    format!("cycle {} ends before it starts", cycle.id),
                ));
            }
        }
        Ok(())
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new("")
    }
}

/// A partial profile update.
///
/// Nullable fields use a nested option: `Some(None)` clears the value,
/// `None` leaves it alone. The predicted next period is deliberately not
/// patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub average_cycle_length: Option<u32>,
    pub average_period_length: Option<u32>,
    pub luteal_phase_length: Option<Option<u32>>,
    pub last_period_start: Option<Option<NaiveDate>>,
    pub last_period_end: Option<Option<NaiveDate>>,
    pub cycle_history: Option<Vec<CycleData>>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn average_cycle_length(mut self, length: u32) -> Self {
        self.average_cycle_length = Some(length);
        self
    }

    pub fn average_period_length(mut self, length: u32) -> Self {
        self.average_period_length = Some(length);
        self
    }

    pub fn luteal_phase_length(mut self, length: Option<u32>) -> Self {
        self.luteal_phase_length = Some(length);
        self
    }

    pub fn last_period_start(mut self, start: Option<NaiveDate>) -> Self {
        self.last_period_start = Some(start);
        self
    }

    pub fn last_period_end(mut self, end: Option<NaiveDate>) -> Self {
        self.last_period_end = Some(end);
        self
    }

    pub fn cycle_history(mut self, history: Vec<CycleData>) -> Self {
        self.cycle_history = Some(history);
        self
    }

    /// Returns true if applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Intensity;
    use crate::domain::tracking::entries::{MoodKind, SymptomKind};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mood() -> Mood {
        Mood::new(
            MoodKind::Happy,
            Intensity::Mild,
            Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
        )
    }

    fn symptom() -> Symptom {
        Symptom::new(
            SymptomKind::Cramps,
            Intensity::Severe,
            Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn new_profile_uses_defaults() {
        let profile = UserProfile::new("Ada");
        assert_eq!(profile.name(), "Ada");
        assert_eq!(profile.average_cycle_length(), 28);
        assert_eq!(profile.average_period_length(), 5);
        assert_eq!(profile.effective_luteal_phase_length(), 14);
        assert!(profile.cycle_history().is_empty());
        assert_eq!(profile.next_period_prediction(), None);
    }

    #[test]
    fn apply_replaces_only_present_fields() {
        let profile = UserProfile::new("Ada");
        let patched = profile.apply(ProfilePatch::new().average_cycle_length(31));
        assert_eq!(patched.average_cycle_length(), 31);
        assert_eq!(patched.name(), "Ada");
        assert_eq!(patched.average_period_length(), 5);
    }

    #[test]
    fn apply_can_clear_nullable_fields() {
        let profile = UserProfile::new("Ada")
            .apply(ProfilePatch::new().last_period_start(Some(date(2024, 1, 1))));
        let cleared = profile.apply(ProfilePatch::new().last_period_start(None));
        assert_eq!(cleared.last_period_start(), None);
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let profile = UserProfile::new("Ada");
        let _ = profile.apply(ProfilePatch::new().name("Grace"));
        assert_eq!(profile.name(), "Ada");
    }

    #[test]
    fn moving_start_past_end_reopens_period() {
        let profile = UserProfile::new("Ada")
            .with_cycle(
                CycleId::new(),
                NewCycle::starting(date(2024, 1, 1)).ending(date(2024, 1, 5)),
            )
            .apply(ProfilePatch::new().last_period_start(Some(date(2024, 1, 29))));

        assert_eq!(profile.last_period_start(), Some(date(2024, 1, 29)));
        assert_eq!(profile.last_period_end(), None);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn explicit_end_before_start_is_dropped() {
        let profile = UserProfile::new("Ada").apply(
            ProfilePatch::new()
                .last_period_start(Some(date(2024, 1, 29)))
                .last_period_end(Some(date(2024, 1, 5))),
        );

        assert_eq!(profile.last_period_end(), None);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn out_of_range_lengths_are_clamped() {
        let profile = UserProfile::new("Ada").apply(
            ProfilePatch::new()
                .average_cycle_length(0)
                .average_period_length(90)
                .luteal_phase_length(Some(0)),
        );

        assert_eq!(profile.average_cycle_length(), 1);
        assert_eq!(profile.average_period_length(), MAX_PERIOD_LENGTH);
        assert_eq!(profile.luteal_phase_length(), Some(1));
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn cycle_ending_before_it_starts_stays_open() {
        let profile = UserProfile::new("Ada").with_cycle(
            CycleId::new(),
            NewCycle::starting(date(2024, 1, 10)).ending(date(2024, 1, 5)),
        );

        assert_eq!(profile.cycle_history()[0].end_date, None);
        assert_eq!(profile.last_period_end(), None);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn patched_history_gets_unique_ids() {
        let id = CycleId::from_string("1700000000000").unwrap();
        let history = vec![
            CycleData::from_new(id.clone(), NewCycle::starting(date(2024, 1, 1))),
            CycleData::from_new(id.clone(), NewCycle::starting(date(2024, 1, 29))),
        ];

        let profile = UserProfile::new("Ada").apply(ProfilePatch::new().cycle_history(history));

        assert_eq!(profile.cycle_history()[0].id, id);
        assert_ne!(profile.cycle_history()[1].id, id);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn empty_patch_is_identity() {
        let profile = UserProfile::new("Ada");
        assert!(ProfilePatch::new().is_empty());
        assert_eq!(profile.apply(ProfilePatch::new()), profile);
    }

    #[test]
    fn with_cycle_sets_last_period_dates() {
        let profile = UserProfile::new("Ada").with_cycle(
            CycleId::new(),
            NewCycle::starting(date(2024, 1, 1)).ending(date(2024, 1, 5)),
        );
        assert_eq!(profile.last_period_start(), Some(date(2024, 1, 1)));
        assert_eq!(profile.last_period_end(), Some(date(2024, 1, 5)));
        assert_eq!(profile.cycle_history().len(), 1);
    }

    #[test]
    fn with_cycle_clears_end_for_ongoing_period() {
        let profile = UserProfile::new("Ada")
            .with_cycle(
                CycleId::new(),
                NewCycle::starting(date(2024, 1, 1)).ending(date(2024, 1, 5)),
            )
            .with_cycle(CycleId::new(), NewCycle::starting(date(2024, 1, 29)));
        assert_eq!(profile.last_period_start(), Some(date(2024, 1, 29)));
        assert_eq!(profile.last_period_end(), None);
    }

    #[test]
    fn entries_attach_to_last_recorded_cycle_only() {
        let first = CycleId::new();
        let second = CycleId::new();
        let profile = UserProfile::new("Ada")
            .with_cycle(first, NewCycle::starting(date(2024, 2, 1)))
            .with_cycle(second.clone(), NewCycle::starting(date(2024, 1, 1)))
            .with_mood(mood())
            .with_symptom(symptom());

        let history = profile.cycle_history();
        assert!(history[0].moods.is_empty());
        assert!(history[0].symptoms.is_empty());
        assert_eq!(history[1].id, second);
        assert_eq!(history[1].moods, vec![mood()]);
        assert_eq!(history[1].symptoms, vec![symptom()]);
    }

    #[test]
    fn entries_without_cycle_are_dropped() {
        let profile = UserProfile::new("Ada").with_mood(mood()).with_symptom(symptom());
        assert!(profile.cycle_history().is_empty());
        assert_eq!(profile, UserProfile::new("Ada"));
    }

    #[test]
    fn current_period_dates_span_period_length() {
        let profile = UserProfile::new("Ada").apply(
            ProfilePatch::new()
                .last_period_start(Some(date(2024, 3, 1)))
                .average_period_length(5),
        );
        assert_eq!(
            profile.current_period_dates(),
            vec![
                date(2024, 3, 1),
                date(2024, 3, 2),
                date(2024, 3, 3),
                date(2024, 3, 4),
                date(2024, 3, 5),
            ]
        );
    }

    #[test]
    fn current_period_dates_fall_back_to_five_days() {
        let profile = UserProfile::new("Ada").apply(
            ProfilePatch::new()
                .last_period_start(Some(date(2024, 2, 27)))
                .average_period_length(0),
        );
        let dates = profile.current_period_dates();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[4], date(2024, 3, 2));
    }

    #[test]
    fn current_period_dates_empty_without_start() {
        assert!(UserProfile::new("Ada").current_period_dates().is_empty());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let profile = UserProfile::new("Ada");
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["averageCycleLength"], 28);
        assert_eq!(json["averagePeriodLength"], 5);
        assert!(json["lastPeriodStart"].is_null());
        assert!(json["nextPeriodPrediction"].is_null());
        assert!(json["cycleHistory"].as_array().unwrap().is_empty());
        assert!(json.get("lutealPhaseLength").is_none());
    }

    #[test]
    fn validate_accepts_fresh_profile() {
        assert!(UserProfile::new("Ada").validate().is_ok());
    }

    fn imported(json: &str) -> UserProfile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn validate_rejects_zero_cycle_length() {
        let profile = imported(r#"{"name":"Ada","averageCycleLength":0,"averagePeriodLength":5}"#);
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_cycle_ids() {
        let profile = imported(
            r#"{"name":"Ada","averageCycleLength":28,"averagePeriodLength":5,"cycleHistory":[
                {"id":"dup","startDate":"2024-01-01"},
                {"id":"dup","startDate":"2024-01-29"}]}"#,
        );
        assert!(matches!(
            profile.validate(),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn validate_rejects_cycle_ending_before_start() {
        let profile = imported(
            r#"{"name":"Ada","averageCycleLength":28,"averagePeriodLength":5,"cycleHistory":[
                {"id":"a","startDate":"2024-01-10","endDate":"2024-01-05"}]}"#,
        );
        assert!(profile.validate().is_err());
    }

    #[test]
    fn validate_rejects_last_end_before_last_start() {
        let profile = imported(
            r#"{"name":"Ada","averageCycleLength":28,"averagePeriodLength":5,
                "lastPeriodStart":"2024-01-29","lastPeriodEnd":"2024-01-05"}"#,
        );
        assert!(profile.validate().is_err());
        assert!(profile.normalized().validate().is_ok());
    }

    proptest! {
        #[test]
        fn applied_patches_always_validate(
            cycle in proptest::option::of(0u32..1000),
            period in proptest::option::of(0u32..200),
            luteal in proptest::option::of(proptest::option::of(0u32..200)),
            start in proptest::option::of(proptest::option::of(0u64..400)),
            end in proptest::option::of(proptest::option::of(0u64..400)),
        ) {
            let day = |offset: u64| date(2024, 1, 1) + Days::new(offset);
            let base = UserProfile::new("Ada").with_cycle(
                CycleId::new(),
                NewCycle::starting(date(2024, 1, 1)).ending(date(2024, 1, 5)),
            );
            let patch = ProfilePatch {
                average_cycle_length: cycle,
                average_period_length: period,
                luteal_phase_length: luteal,
                last_period_start: start.map(|d| d.map(day)),
                last_period_end: end.map(|d| d.map(day)),
                ..ProfilePatch::default()
            };
            prop_assert!(base.apply(patch).validate().is_ok());
        }
    }
}
