//! Exam generation configuration from TOML (`[exams]` section)

use exambank_application::ExamPolicy;
use serde::{Deserialize, Serialize};

/// Raw exam generation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExamsConfig {
    /// Reject hand-picked questions from another subject
    pub strict_preselection: bool,
    /// Fixed RNG seed for reproducible draws
    pub seed: Option<u64>,
}

impl Default for FileExamsConfig {
    fn default() -> Self {
        let policy = ExamPolicy::default();
        Self {
            strict_preselection: policy.strict_preselection,
            seed: policy.seed,
        }
    }
}

impl FileExamsConfig {
    pub fn to_policy(&self) -> ExamPolicy {
        ExamPolicy {
            strict_preselection: self.strict_preselection,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_policy_default() {
        assert_eq!(FileExamsConfig::default().to_policy(), ExamPolicy::default());
    }

    #[test]
    fn test_to_policy() {
        let config = FileExamsConfig {
            strict_preselection: false,
            seed: Some(3),
        };
        let policy = config.to_policy();
        assert!(!policy.strict_preselection);
        assert_eq!(policy.seed, Some(3));
    }
}
