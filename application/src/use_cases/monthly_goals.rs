//! Monthly goals use case
//!
//! One hour target per subject, with the hours completed so far.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::record_store::{RecordStore, StoreError};
use crate::use_cases::shared::find_subject;
use exambank_domain::{DomainError, GoalSummary, MonthlyGoal, Subject, SubjectId};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while managing monthly goals
#[derive(Error, Debug)]
pub enum GoalError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Subject not found: {0}")]
    UnknownSubject(SubjectId),

    #[error("No monthly goal for subject {0}")]
    UnknownGoal(SubjectId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Every goal with the overall totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalBoard {
    pub goals: Vec<MonthlyGoal>,
    pub summary: GoalSummary,
}

/// Use case for monthly goals
pub struct MonthlyGoalsUseCase {
    goals: Arc<dyn RecordStore<MonthlyGoal>>,
    subjects: Arc<dyn RecordStore<Subject>>,
    activity: Arc<dyn ActivityLogger>,
}

impl MonthlyGoalsUseCase {
    pub fn new(
        goals: Arc<dyn RecordStore<MonthlyGoal>>,
        subjects: Arc<dyn RecordStore<Subject>>,
    ) -> Self {
        Self {
            goals,
            subjects,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    pub fn board(&self) -> Result<GoalBoard, GoalError> {
        let goals = self.goals.list()?;
        let summary = GoalSummary::of(&goals);
        Ok(GoalBoard { goals, summary })
    }

    pub fn get(&self, subject_id: &SubjectId) -> Result<MonthlyGoal, GoalError> {
        self.goals
            .get(subject_id.as_str())?
            .ok_or_else(|| GoalError::UnknownGoal(subject_id.clone()))
    }

    /// Set the goal of an existing subject, replacing any previous one.
    pub fn set(
        &self,
        subject_id: &SubjectId,
        target: u32,
        completed: u32,
    ) -> Result<MonthlyGoal, GoalError> {
        find_subject(self.subjects.as_ref(), subject_id)?
            .ok_or_else(|| GoalError::UnknownSubject(subject_id.clone()))?;
        let goal = MonthlyGoal::new(subject_id.clone(), target, completed)?;
        self.save(goal)
    }

    /// Change target and/or completed hours of an existing goal.
    pub fn update(
        &self,
        subject_id: &SubjectId,
        target: Option<u32>,
        completed: Option<u32>,
    ) -> Result<MonthlyGoal, GoalError> {
        let mut goal = self.get(subject_id)?;
        goal.update(target, completed)?;
        self.save(goal)
    }

    pub fn delete(&self, subject_id: &SubjectId) -> Result<(), GoalError> {
        if !self.goals.delete(subject_id.as_str())? {
            return Err(GoalError::UnknownGoal(subject_id.clone()));
        }
        info!("Deleted monthly goal of subject {}", subject_id);
        self.activity.log(ActivityEvent::new(
            "goal_deleted",
            serde_json::json!({ "subjectId": subject_id.as_str() }),
        ));
        Ok(())
    }

    fn save(&self, goal: MonthlyGoal) -> Result<MonthlyGoal, GoalError> {
        self.goals.save(goal.clone())?;
        info!(
            "Goal for subject {}: {}/{} hours",
            goal.subject_id, goal.completed, goal.target
        );
        self.activity.log(ActivityEvent::new(
            "goal_saved",
            serde_json::json!({
                "subjectId": goal.subject_id.as_str(),
                "target": goal.target,
                "completed": goal.completed,
            }),
        ));
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::record_store::InMemoryStore;

    fn goals() -> (MonthlyGoalsUseCase, SubjectId, SubjectId) {
        let math = Subject::new("Math", 3, vec![]).unwrap();
        let art = Subject::new("Art", 2, vec![]).unwrap();
        let ids = (math.id.clone(), art.id.clone());
        let use_case = MonthlyGoalsUseCase::new(
            Arc::new(InMemoryStore::<MonthlyGoal>::new()),
            Arc::new(InMemoryStore::with_records(vec![math, art])),
        );
        (use_case, ids.0, ids.1)
    }

    #[test]
    fn test_set_requires_known_subject() {
        let (goals, _, _) = goals();
        let err = goals.set(&SubjectId::new("nope"), 10, 0).unwrap_err();
        assert!(matches!(err, GoalError::UnknownSubject(_)));
    }

    #[test]
    fn test_set_replaces_and_board_totals() {
        let (goals, math, art) = goals();
        goals.set(&math, 10, 2).unwrap();
        goals.set(&math, 20, 5).unwrap();
        goals.set(&art, 10, 10).unwrap();

        let board = goals.board().unwrap();
        assert_eq!(board.goals.len(), 2);
        assert_eq!(board.summary.target, 30);
        assert_eq!(board.summary.completed, 15);
        assert_eq!(board.summary.percent, 50.0);
    }

    #[test]
    fn test_update_keeps_invariant() {
        let (goals, math, _) = goals();
        goals.set(&math, 10, 4).unwrap();

        let err = goals.update(&math, None, Some(11)).unwrap_err();
        assert!(matches!(err, GoalError::Invalid(_)));
        assert_eq!(goals.get(&math).unwrap().completed, 4);

        let updated = goals.update(&math, None, Some(10)).unwrap();
        assert!(updated.is_reached());
    }

    #[test]
    fn test_update_and_delete_unknown_goal() {
        let (goals, math, _) = goals();
        assert!(matches!(
            goals.update(&math, Some(5), None),
            Err(GoalError::UnknownGoal(_))
        ));
        assert!(matches!(goals.delete(&math), Err(GoalError::UnknownGoal(_))));
    }
}
