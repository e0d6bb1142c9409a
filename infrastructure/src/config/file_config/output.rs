//! Output configuration from TOML (`[output]` section)

use exambank_domain::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format: "table" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Parse `format`, falling back to the default with a warning.
    pub fn parse_format(&self) -> (OutputFormat, Vec<ConfigIssue>) {
        let Some(raw) = &self.format else {
            return (OutputFormat::default(), Vec::new());
        };
        match raw.parse::<OutputFormat>() {
            Ok(format) => (format, Vec::new()),
            Err(value) => (
                OutputFormat::default(),
                vec![ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "output.format".to_string(),
                        value: value.clone(),
                        valid_values: vec!["table".to_string(), "json".to_string()],
                    },
                    message: format!(
                        "output.format: unknown value '{}', falling back to 'table'",
                        value
                    ),
                }],
            ),
        }
    }
}
