//! Presentation layer for exam-bank
//!
//! This crate contains CLI definitions, output formatters and the console
//! assembly reporter.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ExamCommand, GoalCommand, QuestionCommand, QuotaArgs, SessionCommand,
    SubjectCommand,
};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::render;
pub use progress::reporter::ConsoleAssemblyReporter;
