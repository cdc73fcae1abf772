//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - CLI option types and parsing
//! - The validated `ScanTarget` a scan runs against

mod constants;
mod target;
mod types;

// Re-export all constants
pub use constants::*;
pub use target::{ScanTarget, WordlistSource};
pub use types::{Config, LogFormat, LogLevel, Opt};
