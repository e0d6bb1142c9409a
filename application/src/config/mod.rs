//! Application-level configuration.
//!
//! This module provides policy types that control how use cases behave:
//!
//! - [`ExamPolicy`]: preselection strictness and optional fixed seed
//! - [`CatalogPolicy`]: subject name uniqueness rules

pub mod policy;

pub use policy::{CatalogPolicy, ExamPolicy};
