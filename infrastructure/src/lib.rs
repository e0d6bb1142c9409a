//! Infrastructure layer for exam-bank
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileExamsConfig, FileLoggingConfig, FileOutputConfig,
    FileStorageConfig, FileSubjectsConfig,
};
pub use logging::JsonlActivityLogger;
pub use storage::JsonFileStore;
