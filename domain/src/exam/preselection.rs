//! Manually curated questions added to an exam before the random draw

use crate::core::ids::QuestionId;
use crate::question::entities::Question;

/// Result of adding a question to a [`Preselection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreselectionOutcome {
    Added,
    /// The id was already in the list; nothing changed.
    AlreadyPresent,
}

/// Ordered, duplicate-free list of hand-picked questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preselection {
    questions: Vec<Question>,
}

impl Preselection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, question: Question) -> PreselectionOutcome {
        if self.contains(&question.id) {
            return PreselectionOutcome::AlreadyPresent;
        }
        self.questions.push(question);
        PreselectionOutcome::Added
    }

    /// Remove by id; returns whether anything was removed.
    pub fn remove(&mut self, id: &QuestionId) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| &q.id != id);
        self.questions.len() != before
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|q| &q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
