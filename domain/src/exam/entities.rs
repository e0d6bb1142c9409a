//! Exam record entity

use super::assembly::ExamSelection;
use super::quota::{DifficultyQuota, total_requested};
use crate::core::ids::{ExamId, QuestionId, SubjectId};
use crate::question::difficulty::Difficulty;
use crate::question::entities::Question;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A generated exam.
///
/// `questions.len() == sum(question_distribution[*].count)` for every record
/// produced by assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: ExamId,
    pub subject_id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub question_distribution: Vec<DifficultyQuota>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ExamRecord {
    /// Build a record from a successful assembly.
    pub fn from_selection(
        id: ExamId,
        subject_id: SubjectId,
        name: impl Into<String>,
        selection: ExamSelection,
    ) -> Self {
        Self {
            id,
            subject_id,
            name: name.into(),
            question_distribution: selection.distribution,
            questions: selection.questions,
        }
    }

    pub fn requested_total(&self) -> usize {
        total_requested(&self.question_distribution)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|q| &q.id == id)
    }

    /// Number of questions per tier, easiest first.
    pub fn count_by_difficulty(&self) -> BTreeMap<Difficulty, usize> {
        let mut counts = BTreeMap::new();
        for q in &self.questions {
            *counts.entry(q.difficulty).or_insert(0) += 1;
        }
        counts
    }

    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id.clone()).collect()
    }
}
