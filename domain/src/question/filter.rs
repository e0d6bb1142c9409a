//! Question search filter

use super::difficulty::Difficulty;
use super::entities::Question;
use crate::core::ids::SubjectId;

/// Criteria for listing questions; every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub subject_id: Option<SubjectId>,
    pub difficulty: Option<Difficulty>,
    pub knowledge_domain: Option<String>,
    /// Case-insensitive substring of the question content.
    pub text: Option<String>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject_id: impl Into<SubjectId>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_knowledge_domain(mut self, domain: impl Into<String>) -> Self {
        self.knowledge_domain = Some(domain.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn matches(&self, question: &Question) -> bool {
        if let Some(subject_id) = &self.subject_id
            && &question.subject_id != subject_id
        {
            return false;
        }
        if let Some(difficulty) = self.difficulty
            && question.difficulty != difficulty
        {
            return false;
        }
        if let Some(domain) = &self.knowledge_domain
            && &question.knowledge_domain != domain
        {
            return false;
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !question.content.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Keep matching questions, preserving input order.
    pub fn apply<'a>(&self, questions: &'a [Question]) -> Vec<&'a Question> {
        questions.iter().filter(|q| self.matches(q)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::QuestionId;

    fn question(id: &str, subject: &str, difficulty: Difficulty, domain: &str, content: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            subject_id: SubjectId::new(subject),
            content: content.to_string(),
            answer: String::new(),
            difficulty,
            knowledge_domain: domain.to_string(),
        }
    }

    fn bank() -> Vec<Question> {
        vec![
            question("q1", "math", Difficulty::Easy, "Algebra", "Solve x + 1 = 2"),
            question("q2", "math", Difficulty::Hard, "Geometry", "Prove Pythagoras"),
            question("q3", "lit", Difficulty::Easy, "Poetry", "Name a sonnet form"),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let bank = bank();
        assert_eq!(QuestionFilter::new().apply(&bank).len(), 3);
    }

    #[test]
    fn test_combined_criteria() {
        let bank = bank();
        let hits = QuestionFilter::new()
            .with_subject("math")
            .with_difficulty(Difficulty::Easy)
            .apply(&bank);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "q1");
    }

    #[test]
    fn test_domain_filter() {
        let bank = bank();
        let hits = QuestionFilter::new().with_knowledge_domain("Geometry").apply(&bank);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "q2");
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let bank = bank();
        let hits = QuestionFilter::new().with_text("PYTHAGORAS").apply(&bank);
        assert_eq!(hits.len(), 1);
    }
}
