//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a recorded menstrual cycle.
///
/// Fresh ids are time-ordered UUIDv7 strings. Ids coming from an import are
/// kept verbatim, whatever their shape (the browser app used millisecond
/// timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(String);

impl CycleId {
    /// Creates a new unique, time-ordered CycleId.
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Creates a CycleId from an existing token.
    pub fn from_string(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        Ok(Self(value))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CycleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_id_new_generates_unique_ids() {
        let id1 = CycleId::new();
        let id2 = CycleId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn cycle_id_new_ids_are_time_ordered() {
        let ids: Vec<CycleId> = (0..16).map(|_| CycleId::new()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn cycle_id_accepts_legacy_timestamp_tokens() {
        let id: CycleId = "1712345678901".parse().unwrap();
        assert_eq!(id.as_str(), "1712345678901");
    }

    #[test]
    fn cycle_id_rejects_blank_token() {
        assert!(CycleId::from_string("  ").is_err());
    }

    #[test]
    fn cycle_id_serializes_as_plain_string() {
        let id = CycleId::from_string("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
