//! Mood and symptom log entries.
//!
//! Entries are immutable once logged: they are only ever appended to a
//! cycle, never edited in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Intensity;

/// Kinds of mood a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoodKind {
    Happy,
    Calm,
    Energetic,
    Sad,
    Anxious,
    Irritable,
    Tired,
    Sensitive,
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoodKind::Happy => "happy",
            MoodKind::Calm => "calm",
            MoodKind::Energetic => "energetic",
            MoodKind::Sad => "sad",
            MoodKind::Anxious => "anxious",
            MoodKind::Irritable => "irritable",
            MoodKind::Tired => "tired",
            MoodKind::Sensitive => "sensitive",
        };
        write!(f, "{}", s)
    }
}

/// Kinds of physical symptom a user can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymptomKind {
    Cramps,
    Headache,
    Bloating,
    BreastTenderness,
    Acne,
    Backache,
    Fatigue,
    Nausea,
    Cravings,
    Insomnia,
    Spotting,
}

impl fmt::Display for SymptomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymptomKind::Cramps => "cramps",
            SymptomKind::Headache => "headache",
            SymptomKind::Bloating => "bloating",
            SymptomKind::BreastTenderness => "breast tenderness",
            SymptomKind::Acne => "acne",
            SymptomKind::Backache => "backache",
            SymptomKind::Fatigue => "fatigue",
            SymptomKind::Nausea => "nausea",
            SymptomKind::Cravings => "cravings",
            SymptomKind::Insomnia => "insomnia",
            SymptomKind::Spotting => "spotting",
        };
        write!(f, "{}", s)
    }
}

/// A logged mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    #[serde(rename = "type")]
    pub kind: MoodKind,
    pub intensity: Intensity,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Mood {
    /// Creates a mood logged at the given moment.
    pub fn new(kind: MoodKind, intensity: Intensity, date: DateTime<Utc>) -> Self {
        Self {
            kind,
            intensity,
            date,
            notes: None,
        }
    }

    /// Attaches a free-text note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A logged symptom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    #[serde(rename = "type")]
    pub kind: SymptomKind,
    pub intensity: Intensity,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Symptom {
    /// Creates a symptom logged at the given moment.
    pub fn new(kind: SymptomKind, intensity: Intensity, date: DateTime<Utc>) -> Self {
        Self {
            kind,
            intensity,
            date,
            notes: None,
        }
    }

    /// Attaches a free-text note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn logged_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap()
    }

    #[test]
    fn mood_uses_type_field_name() {
        let mood = Mood::new(MoodKind::Anxious, Intensity::Moderate, logged_at());
        let json = serde_json::to_value(&mood).unwrap();
        assert_eq!(json["type"], "anxious");
        assert_eq!(json["intensity"], 2);
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn symptom_kinds_are_camel_case() {
        let symptom = Symptom::new(SymptomKind::BreastTenderness, Intensity::Mild, logged_at())
            .with_notes("left side");
        let json = serde_json::to_value(&symptom).unwrap();
        assert_eq!(json["type"], "breastTenderness");
        assert_eq!(json["notes"], "left side");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let raw = r#"{"type":"ecstatic","intensity":1,"date":"2024-03-02T08:30:00Z"}"#;
        let result: Result<Mood, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(SymptomKind::BreastTenderness.to_string(), "breast tenderness");
        assert_eq!(MoodKind::Calm.to_string(), "calm");
    }
}
