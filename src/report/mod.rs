//! Report module - console rendering of stage summaries and rankings

pub mod correlation_report;
pub mod summary;

pub use correlation_report::*;
pub use summary::*;
