//! Error type definitions.
//!
//! This module defines the scan-level error taxonomy and the failure kinds
//! used to categorize per-query failures.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Process exit code for a configuration or I/O failure.
pub const EXIT_CONFIGURATION_ERROR: i32 = 1;
/// Process exit code when the target domain itself cannot be resolved.
pub const EXIT_UNRESOLVABLE_DOMAIN: i32 = 2;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Fatal, scan-level errors.
///
/// These abort a scan before any candidate work starts. Per-query failures
/// never surface here; they are counted in the scan statistics instead.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The target domain is empty or not a syntactically valid hostname.
    #[error("Invalid target domain '{domain}': {reason}")]
    InvalidDomain {
        /// Domain as supplied by the caller
        domain: String,
        /// Why it was rejected
        reason: String,
    },

    /// Thread count outside the supported range.
    #[error("Invalid thread count {0}: must be between {min} and {max}", min = crate::config::MIN_THREADS, max = crate::config::MAX_THREADS)]
    InvalidThreadCount(usize),

    /// Per-query timeout of zero.
    #[error("Invalid per-query timeout: must be greater than zero")]
    InvalidTimeout,

    /// Custom wordlist could not be read, or contained no labels.
    #[error("Wordlist error: {0}")]
    Wordlist(String),

    /// No record of any type could be resolved for the target domain.
    #[error("Target domain '{0}' could not be resolved")]
    UnresolvableDomain(String),
}

impl ScanError {
    /// Maps the error to the process exit code reported by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::UnresolvableDomain(_) => EXIT_UNRESOLVABLE_DOMAIN,
            _ => EXIT_CONFIGURATION_ERROR,
        }
    }
}

/// Categories of per-query failures during enumeration.
///
/// `NotFound` is the expected outcome for most brute-force candidates and is
/// counted as a failure only in the statistical sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    NotFound,
    Timeout,
    TransportError,
    TaskPanicked,
}

impl FailureKind {
    /// Human-readable label used in the final statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NotFound => "Name not found",
            FailureKind::Timeout => "Query timeout",
            FailureKind::TransportError => "Transport error",
            FailureKind::TaskPanicked => "Task panicked",
        }
    }
}
