//! Study duration value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Length of a study session in whole minutes.
///
/// Written and read as `HH:MM` (`"01:30"`); hours may exceed 23.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudyDuration {
    minutes: u32,
}

impl StudyDuration {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0
    }

    /// Sum of durations, saturating at `u32::MAX` minutes.
    pub fn total<'a>(durations: impl IntoIterator<Item = &'a StudyDuration>) -> Self {
        let minutes = durations
            .into_iter()
            .fold(0u32, |acc, d| acc.saturating_add(d.minutes));
        Self { minutes }
    }
}

impl std::fmt::Display for StudyDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

impl std::str::FromStr for StudyDuration {
    type Err = DomainError;

    /// Parses `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            DomainError::InvalidSession(format!("duration '{}' should look like HH:MM", s))
        };

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .map(Self::from_minutes)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for StudyDuration {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StudyDuration> for String {
    fn from(duration: StudyDuration) -> Self {
        duration.to_string()
    }
}
