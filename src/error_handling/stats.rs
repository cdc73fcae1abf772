//! Failure statistics tracking.
//!
//! This module provides thread-safe counters for per-query failure kinds
//! observed while a scan is running.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use log::error;
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe failure counter, one atomic per [`FailureKind`].
///
/// All kinds are initialized to zero on creation, so increments never need
/// to insert and the map itself is never mutated after construction.
///
/// # Thread Safety
///
/// Shared across completion handlers via `Arc`.
#[derive(Debug)]
pub struct FailureStats {
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl FailureStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }
        FailureStats { failures }
    }

    /// Increment a failure counter.
    pub fn increment(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in FailureStats initialization.",
                kind
            );
        }
    }

    /// Get the count for a failure kind.
    pub fn get(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failures across all kinds.
    pub fn total(&self) -> usize {
        FailureKind::iter().map(|k| self.get(k)).sum()
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
