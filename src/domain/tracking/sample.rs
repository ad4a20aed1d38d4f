//! Sample profile shown to first-time users before they log anything.

use chrono::{Days, NaiveDate, NaiveTime, TimeZone, Utc};

use super::cycle::NewCycle;
use super::entries::{Mood, MoodKind, Symptom, SymptomKind};
use super::profile::{ProfilePatch, UserProfile, DEFAULT_CYCLE_LENGTH};
use crate::domain::foundation::{CycleId, Intensity};

const SAMPLE_CYCLES: u64 = 3;

/// Builds a demo profile with three regular cycles, the last one starting
/// two weeks before `today`.
///
/// Predictions are not computed here; callers run the prediction engine.
pub fn sample_profile(today: NaiveDate) -> UserProfile {
    let cycle_days = u64::from(DEFAULT_CYCLE_LENGTH);
    let first_offset = 14 + cycle_days * (SAMPLE_CYCLES - 1);

    let profile = UserProfile::new("Guest").apply(
        ProfilePatch::new()
            .average_period_length(5)
            .luteal_phase_length(Some(14)),
    );

    (0..SAMPLE_CYCLES)
        .filter_map(|n| today.checked_sub_days(Days::new(first_offset - n * cycle_days)))
        .fold(profile, |profile, start| {
            let end = start.checked_add_days(Days::new(4)).unwrap_or(start);
            let second_day = start.checked_add_days(Days::new(1)).unwrap_or(start);
            let logged_at = Utc.from_utc_datetime(&second_day.and_time(NaiveTime::MIN));
            let cycle = NewCycle::starting(start)
                .ending(end)
                .with_mood(Mood::new(MoodKind::Tired, Intensity::Moderate, logged_at))
                .with_symptom(Symptom::new(SymptomKind::Cramps, Intensity::Moderate, logged_at));
            profile.with_cycle(CycleId::new(), cycle)
        })
}
