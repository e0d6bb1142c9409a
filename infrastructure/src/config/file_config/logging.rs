//! Activity log configuration from TOML (`[logging]` section)

use exambank_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw activity log configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file that receives one line per change; disabled when unset
    pub activity_log: Option<PathBuf>,
}

impl FileLoggingConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        match &self.activity_log {
            Some(path) if path.as_os_str().is_empty() => vec![ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyPath {
                    field: "logging.activity_log".to_string(),
                },
                message: "logging.activity_log is set but empty".to_string(),
            }],
            _ => Vec::new(),
        }
    }
}
