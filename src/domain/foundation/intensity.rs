//! Intensity value object for logged moods and symptoms (1 to 3 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// How strongly a mood or symptom was felt.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Intensity {
    #[default]
    Mild = 1,
    Moderate = 2,
    Severe = 3,
}

impl Intensity {
    /// Creates an Intensity from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Intensity::Mild),
            2 => Ok(Intensity::Moderate),
            3 => Ok(Intensity::Severe),
            _ => Err(ValidationError::out_of_range(
                "intensity",
                1,
                3,
                i64::from(value),
            )),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Mild => "Mild",
            Intensity::Moderate => "Moderate",
            Intensity::Severe => "Severe",
        }
    }
}

impl TryFrom<u8> for Intensity {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from_u8(value)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.value()
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
