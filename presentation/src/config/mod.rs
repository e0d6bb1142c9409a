//! Presentation-level configuration
//!
//! Resolves how results are rendered from command-line flags and the
//! configuration file.

use exambank_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Flags win over the file; `--no-color` can only turn color off.
    pub fn resolve(
        flag_format: Option<OutputFormat>,
        no_color: bool,
        file_format: OutputFormat,
        file_color: bool,
    ) -> Self {
        Self {
            format: flag_format.unwrap_or(file_format),
            color: file_color && !no_color,
        }
    }

    /// Apply the color choice to the whole process.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
