//! Study log use case
//!
//! Record, edit, list and delete study sessions.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::record_store::{RecordStore, StoreError};
use crate::use_cases::shared::find_subject;
use chrono::NaiveDateTime;
use exambank_domain::{
    DomainError, SessionEdit, SessionFilter, SessionId, StudyDuration, StudySession, Subject,
    SubjectId,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while managing study sessions
#[derive(Error, Debug)]
pub enum StudyLogError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Subject not found: {0}")]
    UnknownSubject(SubjectId),

    #[error("Study session not found: {0}")]
    UnknownSession(SessionId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for logging a session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub subject_id: SubjectId,
    pub date: NaiveDateTime,
    pub duration: StudyDuration,
    pub content: String,
    pub notes: Option<String>,
}

/// Sessions of one listing plus their total time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionListing {
    /// Oldest first.
    pub sessions: Vec<StudySession>,
    pub total: StudyDuration,
}

/// Use case for the study log
pub struct StudyLogUseCase {
    sessions: Arc<dyn RecordStore<StudySession>>,
    subjects: Arc<dyn RecordStore<Subject>>,
    activity: Arc<dyn ActivityLogger>,
}

impl StudyLogUseCase {
    pub fn new(
        sessions: Arc<dyn RecordStore<StudySession>>,
        subjects: Arc<dyn RecordStore<Subject>>,
    ) -> Self {
        Self {
            sessions,
            subjects,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Sessions matching `filter`, oldest first.
    pub fn list(&self, filter: &SessionFilter) -> Result<SessionListing, StudyLogError> {
        let mut sessions: Vec<StudySession> = self
            .sessions
            .list()?
            .into_iter()
            .filter(|s| filter.matches(s))
            .collect();
        sessions.sort_by_key(|s| s.date);
        let total = StudyDuration::total(sessions.iter().map(|s| &s.duration));
        Ok(SessionListing { sessions, total })
    }

    pub fn get(&self, id: &SessionId) -> Result<StudySession, StudyLogError> {
        self.sessions
            .get(id.as_str())?
            .ok_or_else(|| StudyLogError::UnknownSession(id.clone()))
    }

    /// Log a session for an existing subject.
    pub fn create(&self, input: NewSession) -> Result<StudySession, StudyLogError> {
        self.require_subject(&input.subject_id)?;
        let session = StudySession::new(
            input.subject_id,
            input.date,
            input.duration,
            input.content,
            input.notes,
        )?;

        self.sessions.save(session.clone())?;
        info!(
            "Logged {} of study for subject {} ({})",
            session.duration, session.subject_id, session.id
        );
        self.log("session_saved", &session);
        Ok(session)
    }

    pub fn update(
        &self,
        id: &SessionId,
        edit: SessionEdit,
    ) -> Result<StudySession, StudyLogError> {
        let mut session = self.get(id)?;
        if let Some(subject_id) = &edit.subject_id {
            self.require_subject(subject_id)?;
        }
        session.apply(edit)?;

        self.sessions.save(session.clone())?;
        info!("Updated study session {}", session.id);
        self.log("session_saved", &session);
        Ok(session)
    }

    pub fn delete(&self, id: &SessionId) -> Result<(), StudyLogError> {
        if !self.sessions.delete(id.as_str())? {
            return Err(StudyLogError::UnknownSession(id.clone()));
        }
        info!("Deleted study session {}", id);
        self.activity.log(ActivityEvent::new(
            "session_deleted",
            serde_json::json!({ "id": id.as_str() }),
        ));
        Ok(())
    }

    fn require_subject(&self, id: &SubjectId) -> Result<Subject, StudyLogError> {
        find_subject(self.subjects.as_ref(), id)?
            .ok_or_else(|| StudyLogError::UnknownSubject(id.clone()))
    }

    fn log(&self, event_type: &'static str, session: &StudySession) {
        self.activity.log(ActivityEvent::new(
            event_type,
            serde_json::json!({
                "id": session.id.as_str(),
                "subjectId": session.subject_id.as_str(),
                "minutes": session.duration.minutes(),
            }),
        ));
    }
}
