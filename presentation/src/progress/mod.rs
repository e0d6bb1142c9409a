//! Assembly progress reporting

pub mod reporter;
