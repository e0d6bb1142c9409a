//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application policies
//! by the `to_*` methods of each section.

mod exams;
mod logging;
mod output;
mod storage;
mod subjects;

pub use exams::FileExamsConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use storage::FileStorageConfig;
pub use subjects::FileSubjectsConfig;

use exambank_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where collections are stored
    pub storage: FileStorageConfig,
    /// Exam generation settings
    pub exams: FileExamsConfig,
    /// Subject catalog settings
    pub subjects: FileSubjectsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Activity log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks enum-like strings that fall back to a default and path fields
    /// that are set but empty.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.output.parse_format().1);
        issues.extend(self.storage.validate());
        issues.extend(self.logging.validate());
        issues
    }
}
