//! Error handling and failure statistics.
//!
//! This module provides:
//! - Scan-level error types (`ScanError`, `InitializationError`)
//! - Failure categorization for individual queries (`FailureKind`)
//! - Thread-safe failure counters (`FailureStats`)
//!
//! Only `ScanError` ever reaches the caller. Individual lookup failures are
//! expected noise during brute force and are contained in the statistics.

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{
    FailureKind, InitializationError, ScanError, EXIT_CONFIGURATION_ERROR,
    EXIT_UNRESOLVABLE_DOMAIN,
};
