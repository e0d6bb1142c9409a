//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown difficulty '{0}' (expected Easy, Medium, Hard or VeryHard)")]
    InvalidDifficulty(String),

    #[error("Invalid quota: {0}")]
    InvalidQuota(String),

    #[error("Invalid study session: {0}")]
    InvalidSession(String),

    #[error("Invalid monthly goal: {0}")]
    InvalidGoal(String),
}

impl DomainError {
    /// Check if this error was caused by a malformed quota such as `hard:x`
    pub fn is_quota_error(&self) -> bool {
        matches!(self, DomainError::InvalidQuota(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_difficulty_display() {
        let error = DomainError::InvalidDifficulty("trivial".to_string());
        assert_eq!(
            error.to_string(),
            "Unknown difficulty 'trivial' (expected Easy, Medium, Hard or VeryHard)"
        );
    }

    #[test]
    fn test_is_quota_error_check() {
        assert!(DomainError::InvalidQuota("x".to_string()).is_quota_error());
        assert!(!DomainError::InvalidSubject("x".to_string()).is_quota_error());
        assert!(!DomainError::InvalidQuestion("x".to_string()).is_quota_error());
    }
}
