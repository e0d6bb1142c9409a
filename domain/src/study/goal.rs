//! Monthly study goals, one per subject

use crate::core::error::DomainError;
use crate::core::ids::SubjectId;
use serde::{Deserialize, Serialize};

/// Hours a subject should be studied this month, and hours done so far.
///
/// Keyed by subject: a subject has at most one goal.
/// Invariant: `target > 0` and `completed <= target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGoal {
    pub subject_id: SubjectId,
    pub target: u32,
    #[serde(default)]
    pub completed: u32,
}

impl MonthlyGoal {
    pub fn new(subject_id: SubjectId, target: u32, completed: u32) -> Result<Self, DomainError> {
        check(target, completed)?;
        Ok(Self {
            subject_id,
            target,
            completed,
        })
    }

    /// Change target and/or completed hours, keeping the invariant.
    ///
    /// Nothing changes when the result would be invalid.
    pub fn update(
        &mut self,
        target: Option<u32>,
        completed: Option<u32>,
    ) -> Result<(), DomainError> {
        let target = target.unwrap_or(self.target);
        let completed = completed.unwrap_or(self.completed);
        check(target, completed)?;
        self.target = target;
        self.completed = completed;
        Ok(())
    }

    /// Completion in percent, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        percent(u64::from(self.completed), u64::from(self.target))
    }

    pub fn is_reached(&self) -> bool {
        self.completed >= self.target
    }
}

fn check(target: u32, completed: u32) -> Result<(), DomainError> {
    if target == 0 {
        return Err(DomainError::InvalidGoal(
            "target must be at least 1 hour".to_string(),
        ));
    }
    if completed > target {
        return Err(DomainError::InvalidGoal(format!(
            "completed hours ({}) cannot exceed the target ({})",
            completed, target
        )));
    }
    Ok(())
}

fn percent(completed: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (completed as f64 / target as f64 * 100.0).min(100.0)
}

/// Totals across every goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub target: u64,
    pub completed: u64,
    pub percent: f64,
}

impl GoalSummary {
    pub fn of(goals: &[MonthlyGoal]) -> Self {
        let target = goals.iter().map(|g| u64::from(g.target)).sum();
        let completed = goals.iter().map(|g| u64::from(g.completed)).sum();
        Self {
            target,
            completed,
            percent: percent(completed, target),
        }
    }
}
