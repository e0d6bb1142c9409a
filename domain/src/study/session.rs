//! Study session entity and listing filter

use super::duration::StudyDuration;
use crate::core::error::DomainError;
use crate::core::ids::{SessionId, SubjectId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stored date format (`2024-03-01 14:30:00`).
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a study date.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM` (also with a `T`
/// separator) and a bare `YYYY-MM-DD`, which means midnight.
pub fn parse_study_date(input: &str) -> Result<NaiveDateTime, DomainError> {
    let input = input.trim();
    for format in [
        DATE_FORMAT,
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(date) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(date);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            DomainError::InvalidSession(format!(
                "date '{}' should look like YYYY-MM-DD [HH:MM[:SS]]",
                input
            ))
        })
}

mod study_date {
    use super::{DATE_FORMAT, parse_study_date};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_study_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// One logged study session for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: SessionId,
    pub subject_id: SubjectId,
    #[serde(with = "study_date")]
    pub date: NaiveDateTime,
    pub duration: StudyDuration,
    /// What was studied.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields to change on a session; `None` keeps the current value.
///
/// `notes: Some("")` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEdit {
    pub subject_id: Option<SubjectId>,
    pub date: Option<NaiveDateTime>,
    pub duration: Option<StudyDuration>,
    pub content: Option<String>,
    pub notes: Option<String>,
}

impl StudySession {
    /// Create a session with a freshly generated id.
    pub fn new(
        subject_id: SubjectId,
        date: NaiveDateTime,
        duration: StudyDuration,
        content: impl Into<String>,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: SessionId::generate(),
            subject_id,
            date,
            duration: check_duration(duration)?,
            content: normalize_content(content.into())?,
            notes: notes.and_then(normalize_notes),
        })
    }

    /// Apply an edit with the same rules as [`StudySession::new`].
    ///
    /// Nothing changes when the edit is rejected.
    pub fn apply(&mut self, edit: SessionEdit) -> Result<(), DomainError> {
        let duration = edit.duration.map(check_duration).transpose()?;
        let content = edit.content.map(normalize_content).transpose()?;

        if let Some(subject_id) = edit.subject_id {
            self.subject_id = subject_id;
        }
        if let Some(date) = edit.date {
            self.date = date;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(notes) = edit.notes {
            self.notes = normalize_notes(notes);
        }
        Ok(())
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

fn check_duration(duration: StudyDuration) -> Result<StudyDuration, DomainError> {
    if duration.is_zero() {
        return Err(DomainError::InvalidSession(
            "duration must be longer than 00:00".to_string(),
        ));
    }
    Ok(duration)
}

fn normalize_content(content: String) -> Result<String, DomainError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidSession(
            "content cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_notes(notes: String) -> Option<String> {
    let trimmed = notes.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Criteria for listing sessions; every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub subject_id: Option<SubjectId>,
    /// Calendar day the session started on.
    pub day: Option<NaiveDate>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject_id: impl Into<SubjectId>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    pub fn matches(&self, session: &StudySession) -> bool {
        if let Some(subject_id) = &self.subject_id
            && &session.subject_id != subject_id
        {
            return false;
        }
        if let Some(day) = self.day
            && session.day() != day
        {
            return false;
        }
        true
    }
}
