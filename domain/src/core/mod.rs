//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: typed identifiers for subjects, questions, exams and study sessions
//! - [`error::DomainError`]: domain-level validation errors

pub mod error;
pub mod ids;
