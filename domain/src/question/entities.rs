//! Question entity

use super::difficulty::Difficulty;
use crate::core::error::DomainError;
use crate::core::ids::{QuestionId, SubjectId};
use serde::{Deserialize, Serialize};

/// Fields to change on a question; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionEdit {
    pub subject_id: Option<SubjectId>,
    pub content: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub knowledge_domain: Option<String>,
}

/// A question in the bank.
///
/// Owned by the question store; only replaced wholesale by an explicit edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub subject_id: SubjectId,
    pub content: String,
    #[serde(default)]
    pub answer: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub knowledge_domain: String,
}

impl Question {
    /// Create a question with a freshly generated id.
    pub fn new(
        subject_id: SubjectId,
        content: impl Into<String>,
        answer: impl Into<String>,
        difficulty: Difficulty,
        knowledge_domain: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: QuestionId::generate(),
            subject_id,
            content: Self::normalize_content(content.into())?,
            answer: normalize_text(answer.into()),
            difficulty,
            knowledge_domain: normalize_text(knowledge_domain.into()),
        })
    }

    /// Apply an edit with the same rules as [`Question::new`].
    ///
    /// Nothing changes when the edit is rejected.
    pub fn apply(&mut self, edit: QuestionEdit) -> Result<(), DomainError> {
        let content = edit.content.map(Self::normalize_content).transpose()?;

        if let Some(subject_id) = edit.subject_id {
            self.subject_id = subject_id;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(answer) = edit.answer {
            self.answer = normalize_text(answer);
        }
        if let Some(difficulty) = edit.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(domain) = edit.knowledge_domain {
            self.knowledge_domain = normalize_text(domain);
        }
        Ok(())
    }

    /// Trim content, rejecting blank input.
    pub fn normalize_content(content: String) -> Result<String, DomainError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "content cannot be empty".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn belongs_to(&self, subject_id: &SubjectId) -> bool {
        &self.subject_id == subject_id
    }
}

fn normalize_text(value: String) -> String {
    value.trim().to_string()
}
