//! Exams: difficulty quotas, curated preselection and stratified assembly.
//!
//! - [`quota::DifficultyQuota`]: how many questions of a tier an exam needs
//! - [`preselection::Preselection`]: questions picked by hand before the draw
//! - [`assembly::assemble`]: fills the quotas at random from the pool
//! - [`entities::ExamRecord`]: the persisted exam

pub mod assembly;
pub mod entities;
pub mod preselection;
pub mod quota;
