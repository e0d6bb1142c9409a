//! Exam archive use case
//!
//! Browse and delete generated exams.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::record_store::{RecordStore, StoreError};
use exambank_domain::{ExamId, ExamRecord, SubjectId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while browsing exams
#[derive(Error, Debug)]
pub enum ExamArchiveError {
    #[error("Exam not found: {0}")]
    UnknownExam(ExamId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for browsing stored exams
pub struct ExamArchiveUseCase {
    exams: Arc<dyn RecordStore<ExamRecord>>,
    activity: Arc<dyn ActivityLogger>,
}

impl ExamArchiveUseCase {
    pub fn new(exams: Arc<dyn RecordStore<ExamRecord>>) -> Self {
        Self {
            exams,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// All exams, or only those of `subject_id`.
    pub fn list(&self, subject_id: Option<&SubjectId>) -> Result<Vec<ExamRecord>, ExamArchiveError> {
        let exams = self.exams.list()?;
        Ok(match subject_id {
            Some(id) => exams.into_iter().filter(|e| &e.subject_id == id).collect(),
            None => exams,
        })
    }

    pub fn get(&self, id: &ExamId) -> Result<ExamRecord, ExamArchiveError> {
        self.exams
            .get(id.as_str())?
            .ok_or_else(|| ExamArchiveError::UnknownExam(id.clone()))
    }

    pub fn delete(&self, id: &ExamId) -> Result<(), ExamArchiveError> {
        if !self.exams.delete(id.as_str())? {
            return Err(ExamArchiveError::UnknownExam(id.clone()));
        }
        info!("Deleted exam {}", id);
        self.activity.log(ActivityEvent::new(
            "exam_deleted",
            serde_json::json!({ "id": id.as_str() }),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::record_store::InMemoryStore;

    fn exam(id: &str, subject: &str) -> ExamRecord {
        ExamRecord {
            id: ExamId::new(id),
            subject_id: SubjectId::new(subject),
            name: format!("Exam {id}"),
            question_distribution: vec![],
            questions: vec![],
        }
    }

    fn archive() -> ExamArchiveUseCase {
        ExamArchiveUseCase::new(Arc::new(InMemoryStore::with_records(vec![
            exam("a", "math"),
            exam("b", "art"),
            exam("c", "math"),
        ])))
    }

    #[test]
    fn test_list_by_subject() {
        let archive = archive();
        assert_eq!(archive.list(None).unwrap().len(), 3);

        let math = archive.list(Some(&SubjectId::new("math"))).unwrap();
        let ids: Vec<_> = math.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_get_and_delete() {
        let archive = archive();
        assert_eq!(archive.get(&ExamId::new("b")).unwrap().name, "Exam b");

        archive.delete(&ExamId::new("b")).unwrap();
        assert!(matches!(
            archive.get(&ExamId::new("b")),
            Err(ExamArchiveError::UnknownExam(_))
        ));
        assert!(matches!(
            archive.delete(&ExamId::new("b")),
            Err(ExamArchiveError::UnknownExam(_))
        ));
    }
}
