//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod exam_archive;
pub mod generate_exam;
pub mod monthly_goals;
pub mod question_bank;
pub(crate) mod shared;
pub mod study_log;
pub mod subject_catalog;
