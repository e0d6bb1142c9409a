//! Storage configuration from TOML (`[storage]` section)

use exambank_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory name used under the platform data dir.
const APP_DIR: &str = "exam-bank";

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding `subjects.json`, `questions.json` and `exams.json`
    pub data_dir: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured directory, else `$XDG_DATA_HOME/exam-bank`, else
    /// `./.exam-bank`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        match &self.data_dir {
            Some(dir) if dir.as_os_str().is_empty() => vec![ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyPath {
                    field: "storage.data_dir".to_string(),
                },
                message: "storage.data_dir is set but empty".to_string(),
            }],
            _ => Vec::new(),
        }
    }
}
