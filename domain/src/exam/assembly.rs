//! Stratified random exam assembly.
//!
//! [`assemble`] fills an ordered list of [`DifficultyQuota`]s from a question
//! pool. Hand-picked questions are credited to quotas first; every remaining
//! slot is drawn uniformly at random, without replacement, from the questions
//! of the subject that match the quota and are not already in the exam.
//!
//! # Algorithm
//!
//! 1. Validate preselected questions (subject, capacity). This happens before
//!    any draw so a rejected request leaves no partial work.
//! 2. Credit each preselected question to the first quota, in declaration
//!    order, that accepts it and still has room.
//! 3. For each quota in declaration order, compute its candidates
//!    ([`candidates`]) excluding ids already taken, then draw the missing
//!    count with a Fisher–Yates partial shuffle. Short candidate lists are
//!    taken whole.
//! 4. If the exam ends up smaller than the requested total, report every
//!    quota that came up short.
//!
//! Selection order inside a quota is random; callers should only rely on
//! membership.

use super::quota::{DifficultyQuota, total_requested};
use crate::core::ids::{QuestionId, SubjectId};
use crate::question::difficulty::Difficulty;
use crate::question::entities::Question;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;

/// Knobs for [`assemble`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Reject preselected questions that belong to another subject.
    pub strict_preselection: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            strict_preselection: true,
        }
    }
}

/// How one quota was filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaFill {
    pub quota: DifficultyQuota,
    /// Questions credited from the preselection.
    pub preselected: usize,
    /// Questions drawn at random.
    pub drawn: usize,
}

impl QuotaFill {
    pub fn filled(&self) -> usize {
        self.preselected + self.drawn
    }

    pub fn missing(&self) -> usize {
        self.quota.count.saturating_sub(self.filled())
    }

    pub fn is_short(&self) -> bool {
        self.missing() > 0
    }
}

/// A quota that could not be filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub difficulty: Difficulty,
    pub knowledge_domain: Option<String>,
    pub requested: usize,
    pub filled: usize,
}

impl Shortfall {
    pub fn missing(&self) -> usize {
        self.requested.saturating_sub(self.filled)
    }
}

impl From<&QuotaFill> for Shortfall {
    fn from(fill: &QuotaFill) -> Self {
        Self {
            difficulty: fill.quota.difficulty,
            knowledge_domain: fill.quota.knowledge_domain.clone(),
            requested: fill.quota.count,
            filled: fill.filled(),
        }
    }
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.knowledge_domain {
            Some(domain) => write!(f, "{} [{}]", self.difficulty, domain)?,
            None => write!(f, "{}", self.difficulty)?,
        }
        write!(
            f,
            " short by {} ({} of {})",
            self.missing(),
            self.filled,
            self.requested
        )
    }
}

/// Errors returned by [`assemble`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Not enough questions in the bank: {}", join_display(.shortfalls))]
    InsufficientQuestions {
        shortfalls: Vec<Shortfall>,
        requested: usize,
        selected: usize,
    },

    #[error("Preselected question {question_id} belongs to subject {actual}, not {expected}")]
    ForeignPreselection {
        question_id: QuestionId,
        expected: SubjectId,
        actual: SubjectId,
    },

    #[error(
        "Preselected questions do not fit the distribution: {}",
        join_display(.question_ids)
    )]
    PreselectionOverflow { question_ids: Vec<QuestionId> },
}

impl AssemblyError {
    /// Per-quota shortfalls, empty for validation failures.
    pub fn shortfalls(&self) -> &[Shortfall] {
        match self {
            AssemblyError::InsufficientQuestions { shortfalls, .. } => shortfalls,
            _ => &[],
        }
    }
}

fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSelection {
    /// Preselected questions first, then draws in quota order.
    pub questions: Vec<Question>,
    /// The input quotas, unchanged.
    pub distribution: Vec<DifficultyQuota>,
    pub fills: Vec<QuotaFill>,
}

/// Questions of `subject_id` that `quota` accepts and whose id is not in
/// `taken`, in pool order. Repeated ids in the pool appear once.
///
/// Deterministic for a fixed pool, subject, quota and exclusion set.
pub fn candidates<'a>(
    pool: &'a [Question],
    subject_id: &SubjectId,
    quota: &DifficultyQuota,
    taken: &HashSet<QuestionId>,
) -> Vec<&'a Question> {
    let mut seen: HashSet<&QuestionId> = HashSet::new();
    pool.iter()
        .filter(|q| q.belongs_to(subject_id) && quota.accepts(q) && !taken.contains(&q.id))
        .filter(|q| seen.insert(&q.id))
        .collect()
}

/// Assemble an exam for `subject_id` satisfying `quotas`.
///
/// `preselected` questions are always part of the result when it succeeds;
/// repeated ids among them are ignored. Nothing is persisted here.
pub fn assemble<R: Rng + ?Sized>(
    pool: &[Question],
    subject_id: &SubjectId,
    quotas: &[DifficultyQuota],
    preselected: &[Question],
    options: AssemblyOptions,
    rng: &mut R,
) -> Result<ExamSelection, AssemblyError> {
    let mut taken: HashSet<QuestionId> = HashSet::new();
    let mut selected: Vec<Question> = Vec::with_capacity(preselected.len());

    for question in preselected {
        if !taken.insert(question.id.clone()) {
            continue;
        }
        if options.strict_preselection && !question.belongs_to(subject_id) {
            return Err(AssemblyError::ForeignPreselection {
                question_id: question.id.clone(),
                expected: subject_id.clone(),
                actual: question.subject_id.clone(),
            });
        }
        selected.push(question.clone());
    }

    let credited = credit_preselection(&selected, quotas)?;

    let mut fills = Vec::with_capacity(quotas.len());
    for (quota, preselected) in quotas.iter().zip(credited) {
        let wanted = quota.count - preselected;
        let mut drawn = 0;

        if wanted > 0 {
            let mut pool_for_quota = candidates(pool, subject_id, quota, &taken);
            let amount = wanted.min(pool_for_quota.len());
            let (picked, _) = pool_for_quota.partial_shuffle(rng, amount);
            for question in picked.iter() {
                taken.insert(question.id.clone());
                selected.push((*question).clone());
            }
            drawn = amount;
        }

        fills.push(QuotaFill {
            quota: quota.clone(),
            preselected,
            drawn,
        });
    }

    let requested = total_requested(quotas);
    if selected.len() < requested {
        return Err(AssemblyError::InsufficientQuestions {
            shortfalls: fills.iter().filter(|f| f.is_short()).map(Shortfall::from).collect(),
            requested,
            selected: selected.len(),
        });
    }

    Ok(ExamSelection {
        questions: selected,
        distribution: quotas.to_vec(),
        fills,
    })
}

/// Credit each preselected question to the first quota with room that
/// accepts it. Returns the per-quota credit counts.
fn credit_preselection(
    preselected: &[Question],
    quotas: &[DifficultyQuota],
) -> Result<Vec<usize>, AssemblyError> {
    let mut credited = vec![0usize; quotas.len()];
    let mut overflow = Vec::new();

    for question in preselected {
        let slot = quotas
            .iter()
            .enumerate()
            .position(|(i, quota)| credited[i] < quota.count && quota.accepts(question));
        match slot {
            Some(i) => credited[i] += 1,
            None => overflow.push(question.id.clone()),
        }
    }

    if overflow.is_empty() {
        Ok(credited)
    } else {
        Err(AssemblyError::PreselectionOverflow {
            question_ids: overflow,
        })
    }
}
