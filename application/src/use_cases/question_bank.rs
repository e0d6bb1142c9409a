//! Question bank use case
//!
//! Create, edit, search and delete questions.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::record_store::{RecordStore, StoreError};
use crate::use_cases::shared::find_subject;
use exambank_domain::{
    Difficulty, DomainError, Question, QuestionEdit, QuestionFilter, QuestionId, Subject,
    SubjectId,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while managing questions
#[derive(Error, Debug)]
pub enum QuestionBankError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Subject not found: {0}")]
    UnknownSubject(SubjectId),

    #[error("Question not found: {0}")]
    UnknownQuestion(QuestionId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for creating a question
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub subject_id: SubjectId,
    pub content: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub knowledge_domain: String,
}

/// Fields to change on an existing question; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct QuestionChanges {
    pub subject_id: Option<SubjectId>,
    pub content: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub knowledge_domain: Option<String>,
}

impl From<QuestionChanges> for QuestionEdit {
    fn from(changes: QuestionChanges) -> Self {
        Self {
            subject_id: changes.subject_id,
            content: changes.content,
            answer: changes.answer,
            difficulty: changes.difficulty,
            knowledge_domain: changes.knowledge_domain,
        }
    }
}

/// Use case for managing the question bank
pub struct QuestionBankUseCase {
    questions: Arc<dyn RecordStore<Question>>,
    subjects: Arc<dyn RecordStore<Subject>>,
    activity: Arc<dyn ActivityLogger>,
}

impl QuestionBankUseCase {
    pub fn new(
        questions: Arc<dyn RecordStore<Question>>,
        subjects: Arc<dyn RecordStore<Subject>>,
    ) -> Self {
        Self {
            questions,
            subjects,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Questions matching `filter`, in store order.
    pub fn list(&self, filter: &QuestionFilter) -> Result<Vec<Question>, QuestionBankError> {
        Ok(self
            .questions
            .list()?
            .into_iter()
            .filter(|q| filter.matches(q))
            .collect())
    }

    pub fn get(&self, id: &QuestionId) -> Result<Question, QuestionBankError> {
        self.questions
            .get(id.as_str())?
            .ok_or_else(|| QuestionBankError::UnknownQuestion(id.clone()))
    }

    pub fn create(&self, input: NewQuestion) -> Result<Question, QuestionBankError> {
        let subject = self.require_subject(&input.subject_id)?;
        let question = Question::new(
            input.subject_id,
            input.content,
            input.answer,
            input.difficulty,
            input.knowledge_domain,
        )?;
        warn_on_unlisted_domain(&subject, &question);

        self.questions.save(question.clone())?;
        info!(
            "Added {} question {} to subject {}",
            question.difficulty, question.id, question.subject_id
        );
        self.log("question_saved", &question);
        Ok(question)
    }

    pub fn update(
        &self,
        id: &QuestionId,
        changes: QuestionChanges,
    ) -> Result<Question, QuestionBankError> {
        let mut question = self.get(id)?;
        question.apply(changes.into())?;

        let subject = self.require_subject(&question.subject_id)?;
        warn_on_unlisted_domain(&subject, &question);

        self.questions.save(question.clone())?;
        info!("Updated question {}", question.id);
        self.log("question_saved", &question);
        Ok(question)
    }

    /// Delete a question. Exams that already contain it keep their copy.
    pub fn delete(&self, id: &QuestionId) -> Result<(), QuestionBankError> {
        if !self.questions.delete(id.as_str())? {
            return Err(QuestionBankError::UnknownQuestion(id.clone()));
        }
        info!("Deleted question {}", id);
        self.activity.log(ActivityEvent::new(
            "question_deleted",
            serde_json::json!({ "id": id.as_str() }),
        ));
        Ok(())
    }

    fn require_subject(&self, id: &SubjectId) -> Result<Subject, QuestionBankError> {
        find_subject(self.subjects.as_ref(), id)?
            .ok_or_else(|| QuestionBankError::UnknownSubject(id.clone()))
    }

    fn log(&self, event_type: &'static str, question: &Question) {
        self.activity.log(ActivityEvent::new(
            event_type,
            serde_json::json!({
                "id": question.id.as_str(),
                "subjectId": question.subject_id.as_str(),
                "difficulty": question.difficulty.as_str(),
            }),
        ));
    }
}

fn warn_on_unlisted_domain(subject: &Subject, question: &Question) {
    if !question.knowledge_domain.is_empty()
        && !subject.knowledge_domains.is_empty()
        && !subject.has_domain(&question.knowledge_domain)
    {
        warn!(
            "Knowledge domain '{}' is not listed for subject {}",
            question.knowledge_domain, subject.name
        );
    }
}
