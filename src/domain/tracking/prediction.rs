//! Prediction engine - pure derivations from cycle history.
//!
//! [`recompute`] is the only writer of `next_period_prediction`. The other
//! functions are read-only queries used by the calendar and insight views.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::cycle::CycleData;
use super::profile::{UserProfile, MAX_CYCLE_LENGTH};

/// Days before ovulation that count as fertile.
const FERTILE_DAYS_BEFORE_OVULATION: u64 = 5;

/// Days before ovulation that count as peak fertility.
const PEAK_DAYS_BEFORE_OVULATION: u64 = 2;

/// How the average cycle length used for predictions is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleLengthPolicy {
    /// Trust the profile's configured `averageCycleLength`.
    Static,
    /// Replace `averageCycleLength` with the mean gap between recorded
    /// period starts once the history has at least two distinct starts.
    #[default]
    Historical,
}

/// Tunables for [`recompute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionSettings {
    pub policy: CycleLengthPolicy,
    /// Number of most recent cycles considered by the historical policy.
    pub history_window: usize,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            policy: CycleLengthPolicy::Historical,
            history_window: 6,
        }
    }
}

/// Recomputes the derived fields of a profile.
///
/// The result differs from the input only in `averageCycleLength` (under the
/// historical policy) and `nextPeriodPrediction`. Without a known period
/// start the prediction is `None`.
pub fn recompute(profile: &UserProfile, settings: &PredictionSettings) -> UserProfile {
    let mut next = profile.clone();

    if settings.policy == CycleLengthPolicy::Historical {
        if let Some(length) = historical_cycle_length(profile.cycle_history(), settings.history_window)
            .filter(|length| *length <= MAX_CYCLE_LENGTH)
        {
            next.set_average_cycle_length(length);
        }
    }

    let prediction = next.last_period_start().and_then(|start| {
        start.checked_add_days(Days::new(u64::from(next.average_cycle_length())))
    });
    next.set_next_period_prediction(prediction);
    next
}

/// Sorted, de-duplicated start dates of the most recent `window` cycles.
fn recent_starts(history: &[CycleData], window: usize) -> Vec<NaiveDate> {
    let mut starts: Vec<NaiveDate> = history.iter().map(|c| c.start_date).collect();
    starts.sort_unstable();
    starts.dedup();
    let skip = starts.len().saturating_sub(window);
    starts.split_off(skip)
}

fn gaps(starts: &[NaiveDate]) -> Vec<i64> {
    starts
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .collect()
}

/// Mean gap in days between consecutive recorded period starts, rounded.
///
/// Returns `None` when fewer than two distinct starts are available.
pub fn historical_cycle_length(history: &[CycleData], window: usize) -> Option<u32> {
    let gaps = gaps(&recent_starts(history, window));
    if gaps.is_empty() {
        return None;
    }
    let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    u32::try_from(mean.round() as i64).ok()
}

/// Estimated fertile window preceding the predicted next period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub ovulation_day: NaiveDate,
    pub peak_start: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Ovulation is placed one luteal phase before the predicted next period;
/// the fertile window is the five days before it plus ovulation day.
pub fn fertile_window(profile: &UserProfile) -> Option<FertileWindow> {
    let next = profile.next_period_prediction()?;
    let ovulation_day =
        next.checked_sub_days(Days::new(u64::from(profile.effective_luteal_phase_length())))?;
    Some(FertileWindow {
        start: ovulation_day.checked_sub_days(Days::new(FERTILE_DAYS_BEFORE_OVULATION))?,
        end: ovulation_day,
        ovulation_day,
        peak_start: ovulation_day.checked_sub_days(Days::new(PEAK_DAYS_BEFORE_OVULATION))?,
    })
}

/// Summary statistics over the recorded history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStats {
    pub total_cycles: usize,
    pub average_cycle_length: Option<f64>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub average_period_length: Option<f64>,
}

pub fn cycle_stats(history: &[CycleData]) -> CycleStats {
    let gaps = gaps(&recent_starts(history, usize::MAX));
    let period_lengths: Vec<i64> = history.iter().filter_map(CycleData::period_length).collect();

    CycleStats {
        total_cycles: history.len(),
        average_cycle_length: mean(&gaps),
        shortest_cycle: gaps.iter().copied().min(),
        longest_cycle: gaps.iter().copied().max(),
        average_period_length: mean(&period_lengths),
    }
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

/// 1-based day of the current cycle on `today`, or `None` before the last
/// known period start.
pub fn cycle_day(profile: &UserProfile, today: NaiveDate) -> Option<u32> {
    let start = profile.last_period_start()?;
    let elapsed = (today - start).num_days();
    if elapsed < 0 {
        return None;
    }
    u32::try_from(elapsed + 1).ok()
}
