//! Domain layer for exam-bank
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on storage or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Question bank
//!
//! [`Subject`]s group [`Question`]s, each tagged with a [`Difficulty`] tier
//! and a knowledge domain.
//!
//! ## Stratified assembly
//!
//! An exam is described by an ordered list of [`DifficultyQuota`]s. The
//! [`assemble`] function fills each quota at random from the subject's
//! questions, after crediting any hand-picked [`Preselection`], and either
//! returns a complete selection or reports which quotas fell short.
//!
//! ## Study tracking
//!
//! [`StudySession`]s log time spent on a subject; a [`MonthlyGoal`] sets the
//! hours a subject should get this month.

pub mod config;
pub mod core;
pub mod exam;
pub mod question;
pub mod study;
pub mod subject;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    ids::{ExamId, QuestionId, SessionId, SubjectId},
};
pub use exam::{
    assembly::{
        AssemblyError, AssemblyOptions, ExamSelection, QuotaFill, Shortfall, assemble, candidates,
    },
    entities::ExamRecord,
    preselection::{Preselection, PreselectionOutcome},
    quota::{DifficultyQuota, total_requested},
};
pub use question::{
    difficulty::Difficulty,
    entities::{Question, QuestionEdit},
    filter::QuestionFilter,
};
pub use study::{
    duration::StudyDuration,
    goal::{GoalSummary, MonthlyGoal},
    session::{SessionEdit, SessionFilter, StudySession, parse_study_date},
};
pub use subject::entities::Subject;
