//! Subjects taught in the study tracker.

pub mod entities;
