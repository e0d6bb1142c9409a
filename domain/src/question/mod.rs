//! Question bank: questions, their difficulty tiers and search filters.

pub mod difficulty;
pub mod entities;
pub mod filter;
