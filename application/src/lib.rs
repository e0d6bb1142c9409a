//! Application layer for exam-bank
//!
//! This crate contains use cases, port definitions, and application policies.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CatalogPolicy, ExamPolicy};
pub use ports::{
    activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger},
    assembly_notifier::{AssemblyNotifier, NoAssemblyProgress},
    record_store::{InMemoryStore, RecordStore, StoreError, StoreResult, StoredRecord},
};
pub use use_cases::exam_archive::{ExamArchiveError, ExamArchiveUseCase};
pub use use_cases::generate_exam::{ExamEdit, ExamRequest, GenerateExamError, GenerateExamUseCase};
pub use use_cases::monthly_goals::{GoalBoard, GoalError, MonthlyGoalsUseCase};
pub use use_cases::question_bank::{
    NewQuestion, QuestionBankError, QuestionBankUseCase, QuestionChanges,
};
pub use use_cases::study_log::{NewSession, SessionListing, StudyLogError, StudyLogUseCase};
pub use use_cases::subject_catalog::{
    CatalogError, NewSubject, SubjectCatalogUseCase, SubjectChanges,
};
