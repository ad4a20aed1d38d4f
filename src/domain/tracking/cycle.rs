//! Cycle records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entries::{Mood, Symptom};
use crate::domain::foundation::{calendar_date, CycleId};

/// One recorded menstrual cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleData {
    pub id: CycleId,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    /// `None` while the period is ongoing.
    #[serde(default, with = "calendar_date::option")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub moods: Vec<Mood>,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

impl CycleData {
    /// Assigns an id to a not-yet-recorded cycle.
    pub fn from_new(id: CycleId, cycle: NewCycle) -> Self {
        Self {
            id,
            start_date: cycle.start_date,
            end_date: cycle.end_date,
            moods: cycle.moods,
            symptoms: cycle.symptoms,
        }
    }

    /// Returns true if no end date has been logged yet.
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// Number of bleeding days, counting both ends.
    pub fn period_length(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }
}

/// A cycle as entered by the user, before it is given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCycle {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub moods: Vec<Mood>,
    pub symptoms: Vec<Symptom>,
}

impl NewCycle {
    /// A cycle whose period started on `start_date` and is still ongoing.
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            moods: Vec::new(),
            symptoms: Vec::new(),
        }
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.moods.push(mood);
        self
    }

    pub fn with_symptom(mut self, symptom: Symptom) -> Self {
        self.symptoms.push(symptom);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_new_keeps_all_fields() {
        let id = CycleId::new();
        let cycle = CycleData::from_new(
            id.clone(),
            NewCycle::starting(date(2024, 1, 1)).ending(date(2024, 1, 5)),
        );
        assert_eq!(cycle.id, id);
        assert_eq!(cycle.start_date, date(2024, 1, 1));
        assert_eq!(cycle.end_date, Some(date(2024, 1, 5)));
        assert!(cycle.moods.is_empty());
    }

    #[test]
    fn period_length_counts_both_ends() {
        let cycle = CycleData::from_new(
            CycleId::new(),
            NewCycle::starting(date(2024, 1, 1)).ending(date(2024, 1, 5)),
        );
        assert_eq!(cycle.period_length(), Some(5));
    }

    #[test]
    fn ongoing_cycle_has_no_period_length() {
        let cycle = CycleData::from_new(CycleId::new(), NewCycle::starting(date(2024, 1, 1)));
        assert!(cycle.is_ongoing());
        assert_eq!(cycle.period_length(), None);
    }

    #[test]
    fn serializes_with_camel_case_dates() {
        let cycle = CycleData::from_new(
            CycleId::from_string("c1").unwrap(),
            NewCycle::starting(date(2024, 2, 3)),
        );
        let json = serde_json::to_value(&cycle).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["startDate"], "2024-02-03");
        assert!(json["endDate"].is_null());
    }

    #[test]
    fn missing_logs_default_to_empty() {
        let raw = r#"{"id":"1712345678901","startDate":"2024-02-03T00:00:00.000Z"}"#;
        let cycle: CycleData = serde_json::from_str(raw).unwrap();
        assert!(cycle.moods.is_empty());
        assert!(cycle.symptoms.is_empty());
        assert_eq!(cycle.start_date, date(2024, 2, 3));
    }
}
