//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod activity_logger;
pub mod assembly_notifier;
pub mod record_store;
