//! Configuration file loading for exam-bank
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `EXAM_BANK_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./exam-bank.toml` or `./.exam-bank.toml`
//! 4. Global: `$XDG_CONFIG_HOME/exam-bank/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileExamsConfig, FileLoggingConfig, FileOutputConfig, FileStorageConfig,
    FileSubjectsConfig,
};
pub use loader::ConfigLoader;
