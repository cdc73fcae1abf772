//! Scan statistics tracking.
//!
//! Counters cover enumeration queries only. Base-record and zone-transfer
//! queries are reported through the result itself.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::dns::QueryStatus;
use crate::error_handling::{FailureKind, FailureStats};

/// Live, thread-safe counters for one scan.
///
/// `total` is incremented on dispatch and exactly one of `successful` or
/// `failed` on completion, so `successful + failed == total` once every
/// dispatched query has reported. After [`freeze`](Self::freeze) the
/// snapshot is fixed and later updates are ignored.
#[derive(Debug)]
pub struct ScanStatistics {
    start: Instant,
    total: AtomicUsize,
    successful: AtomicUsize,
    failed: AtomicUsize,
    failures: Arc<FailureStats>,
    // Nanoseconds from `start` to the most recent completion.
    last_outcome_nanos: AtomicU64,
    frozen: OnceLock<StatisticsSnapshot>,
}

/// Read-only view of [`ScanStatistics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    #[serde(rename = "total_queries")]
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub not_found: usize,
    pub timeouts: usize,
    /// Transport errors and panicked tasks
    pub errors: usize,
    #[serde(rename = "duration_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64())
}

impl ScanStatistics {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            total: AtomicUsize::new(0),
            successful: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            failures: Arc::new(FailureStats::new()),
            last_outcome_nanos: AtomicU64::new(0),
            frozen: OnceLock::new(),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    /// Counts a query that has been handed to the resolver.
    pub fn record_dispatch(&self) {
        if self.is_frozen() {
            return;
        }
        self.total.fetch_add(1, Ordering::SeqCst);
    }

    /// Classifies a completed query.
    pub fn record_outcome(&self, status: &QueryStatus) {
        if self.is_frozen() {
            return;
        }
        match status {
            QueryStatus::Resolved(_) => {
                self.successful.fetch_add(1, Ordering::SeqCst);
            }
            QueryStatus::NotFound => self.record_failure(FailureKind::NotFound),
            QueryStatus::Timeout => self.record_failure(FailureKind::Timeout),
            QueryStatus::Error(_) => self.record_failure(FailureKind::TransportError),
        }
        self.touch();
    }

    /// Counts a query whose task panicked before producing an outcome.
    pub fn record_panic(&self) {
        if self.is_frozen() {
            return;
        }
        self.record_failure(FailureKind::TaskPanicked);
        self.touch();
    }

    fn record_failure(&self, kind: FailureKind) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.failures.increment(kind);
    }

    fn touch(&self) {
        let nanos = u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.last_outcome_nanos.fetch_max(nanos, Ordering::SeqCst);
    }

    /// Per-kind failure counters.
    pub fn failures(&self) -> &Arc<FailureStats> {
        &self.failures
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Start to last observed outcome; time so far when nothing completed.
    pub fn elapsed(&self) -> Duration {
        match self.last_outcome_nanos.load(Ordering::SeqCst) {
            0 => self.start.elapsed(),
            nanos => Duration::from_nanos(nanos),
        }
    }

    /// Current counts, or the frozen counts after [`freeze`](Self::freeze).
    pub fn snapshot(&self) -> StatisticsSnapshot {
        if let Some(frozen) = self.frozen.get() {
            return frozen.clone();
        }
        self.live_snapshot()
    }

    /// Fixes the statistics. The first call wins.
    pub fn freeze(&self) -> StatisticsSnapshot {
        self.frozen.get_or_init(|| self.live_snapshot()).clone()
    }

    fn live_snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total: self.total.load(Ordering::SeqCst),
            successful: self.successful.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            not_found: self.failures.get(FailureKind::NotFound),
            timeouts: self.failures.get(FailureKind::Timeout),
            errors: self.failures.get(FailureKind::TransportError)
                + self.failures.get(FailureKind::TaskPanicked),
            elapsed: self.elapsed(),
        }
    }
}

impl Default for ScanStatistics {
    fn default() -> Self {
        Self::new()
    }
}
