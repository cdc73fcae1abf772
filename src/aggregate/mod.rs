//! Result aggregation.
//!
//! Completions arrive from many tasks in arbitrary order. The
//! [`ResultAggregator`] folds them into one consistent view:
//! - outcomes for the target domain itself feed the [`DnsRecordSet`]
//! - outcomes for any other name become [`SubdomainHit`]s, one per hostname
//! - non-resolved outcomes are ignored (they only count in statistics)
//!
//! Merging is idempotent. Merge order affects display order only.

mod types;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::dns::{QueryOutcome, QueryStatus, ZoneTransferFinding};
use crate::scan::ScanStatistics;

// Re-export public API
pub use types::{DnsRecordSet, ScanResult, SubdomainHit};

#[derive(Debug, Default)]
struct AggregateState {
    records: DnsRecordSet,
    hits: Vec<SubdomainHit>,
    hit_index: HashMap<String, usize>,
    zone_transfer: ZoneTransferFinding,
    cancelled: bool,
}

/// Thread-safe accumulator for a single scan's results.
#[derive(Debug)]
pub struct ResultAggregator {
    domain: String,
    timestamp: DateTime<Utc>,
    statistics: Arc<ScanStatistics>,
    state: Mutex<AggregateState>,
}

impl ResultAggregator {
    pub fn new(domain: impl Into<String>, statistics: Arc<ScanStatistics>) -> Self {
        Self {
            domain: domain.into(),
            timestamp: Utc::now(),
            statistics,
            state: Mutex::new(AggregateState::default()),
        }
    }

    /// Folds one outcome into the result.
    ///
    /// Returns `true` when the outcome created a new subdomain hit.
    pub fn merge(&self, outcome: &QueryOutcome) -> bool {
        let QueryStatus::Resolved(values) = &outcome.status else {
            return false;
        };
        let mut state = self.lock();

        if outcome.name.eq_ignore_ascii_case(&self.domain) {
            state.records.insert(outcome.record_type, values);
            return false;
        }

        let AggregateState { hits, hit_index, .. } = &mut *state;
        match hit_index.get(&outcome.name) {
            Some(&idx) => {
                let hit = &mut hits[idx];
                for value in values {
                    if !hit.values.contains(value) {
                        hit.values.push(value.clone());
                    }
                }
                false
            }
            None => {
                hit_index.insert(outcome.name.clone(), hits.len());
                hits.push(SubdomainHit {
                    hostname: outcome.name.clone(),
                    values: values.clone(),
                });
                true
            }
        }
    }

    pub fn record_zone_transfer(&self, finding: ZoneTransferFinding) {
        self.lock().zone_transfer = finding;
    }

    pub fn mark_cancelled(&self) {
        self.lock().cancelled = true;
    }

    pub fn has_base_records(&self) -> bool {
        !self.lock().records.is_empty()
    }

    pub fn hit_count(&self) -> usize {
        self.lock().hits.len()
    }

    /// Current view of the result. Safe to call at any time; the call made
    /// after the scan terminates is authoritative.
    pub fn snapshot(&self) -> ScanResult {
        let state = self.lock();
        ScanResult {
            domain: self.domain.clone(),
            timestamp: self.timestamp,
            dns_records: state.records.clone(),
            subdomains: state.hits.clone(),
            zone_transfer: state.zone_transfer.clone(),
            statistics: self.statistics.snapshot(),
            cancelled: state.cancelled,
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregateState> {
        // Every mutation leaves the containers consistent, so a poisoned
        // lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
