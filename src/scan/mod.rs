//! Scan orchestration.
//!
//! A scan runs through these phases (see [`ScanPhase`]):
//! 1. Base records: the six record types for the target domain, merged as
//!    they arrive, concurrently with the zone-transfer check
//! 2. Zone transfer: wait for the AXFR check to report
//! 3. Enumeration: every wordlist candidate resolved for `A` through the gate
//! 4. Finalization: statistics frozen and the immutable result published
//!
//! All network work shares one [`ConcurrencyGate`], so the configured thread
//! count bounds the whole scan. Per-candidate failures never abort a scan;
//! the only fatal runtime condition is a target domain with no records at
//! all.

mod observer;
mod phase;
mod statistics;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;

use crate::aggregate::{ResultAggregator, ScanResult, SubdomainHit};
use crate::app::statistics::print_failure_statistics;
use crate::app::{log_progress, shutdown_gracefully};
use crate::config::{ScanTarget, PROGRESS_INTERVAL_SECS};
use crate::dns::{DnsResolver, QueryStatus, RecordType, ResolverAdapter, ZoneTransferFinding};
use crate::error_handling::ScanError;
use crate::gate::ConcurrencyGate;
use crate::wordlist::{candidates, Wordlist};

// Re-export public API
pub use observer::{NoopObserver, ScanObserver};
pub use phase::ScanPhase;
pub use statistics::{ScanStatistics, StatisticsSnapshot};

/// Runs scans of one target against one resolver.
pub struct ScanEngine {
    target: ScanTarget,
    adapter: ResolverAdapter,
    observer: Arc<dyn ScanObserver>,
}

impl ScanEngine {
    pub fn new(target: ScanTarget, resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            target,
            adapter: ResolverAdapter::new(resolver),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    /// Runs a full scan with candidates from `wordlist`.
    ///
    /// Cancelling `cancel` stops new work from being dispatched; in-flight
    /// queries finish or time out and the partial result is returned with
    /// `cancelled` set.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::UnresolvableDomain` when none of the base record
    /// types resolves for the target domain. No candidate is tried in that
    /// case.
    pub async fn run(
        &self,
        wordlist: &Wordlist,
        cancel: CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        let domain = self.target.domain().to_string();
        let timeout = self.target.query_timeout();
        let mut phases = PhaseTracker::new(Arc::clone(&self.observer));

        let statistics = Arc::new(ScanStatistics::new());
        let aggregator = ResultAggregator::new(domain.clone(), Arc::clone(&statistics));
        let gate = ConcurrencyGate::new(self.target.concurrency(), cancel.clone());

        info!(
            "Scanning {domain}: {} candidates, {} threads, {:?} per-query timeout",
            wordlist.len(),
            gate.limit(),
            timeout
        );

        let cancel_logging = cancel.child_token();
        let logging_task = spawn_progress_logging(
            Arc::clone(&statistics),
            gate.clone(),
            cancel_logging.clone(),
        );

        phases.advance(ScanPhase::GatheringBaseRecords);
        let zone_task = {
            let gate = gate.clone();
            let adapter = self.adapter.clone();
            let domain = domain.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                gate.run(async move {
                    adapter
                        .test_zone_transfer(&domain, timeout, &cancel)
                        .await
                })
                .await
            })
        };

        let base_tally = self
            .gather_base_records(&gate, &aggregator, &domain, timeout)
            .await;

        phases.advance(ScanPhase::TestingZoneTransfer);
        let finding = match zone_task.await {
            Ok(Some(finding)) => finding,
            Ok(None) => {
                debug!("Zone transfer check did not run");
                ZoneTransferFinding::negative()
            }
            Err(e) => {
                warn!("Zone transfer task panicked: {e:?}");
                ZoneTransferFinding::negative()
            }
        };
        self.observer.on_zone_transfer(&finding);
        aggregator.record_zone_transfer(finding);

        let has_base_records = aggregator.has_base_records();
        if !has_base_records && !cancel.is_cancelled() {
            warn!("No records found for {domain} ({base_tally}); skipping enumeration");
            shutdown_gracefully(cancel_logging, Some(logging_task)).await;
            return Err(ScanError::UnresolvableDomain(domain));
        }
        if has_base_records {
            phases.advance(ScanPhase::Enumerating);
            self.enumerate(&gate, &aggregator, &statistics, wordlist, timeout)
                .await;
        }

        phases.advance(ScanPhase::Finalizing);
        if cancel.is_cancelled() {
            info!("Scan of {domain} cancelled; reporting partial results");
            aggregator.mark_cancelled();
        }
        shutdown_gracefully(cancel_logging, Some(logging_task)).await;
        statistics.freeze();
        log_progress(statistics.start(), &statistics, gate.in_flight());
        print_failure_statistics(statistics.failures());
        debug!(
            "Peak concurrency {} of {} permits",
            gate.peak_in_flight(),
            gate.limit()
        );

        let result = aggregator.snapshot();
        phases.advance(ScanPhase::Complete);
        Ok(result)
    }

    async fn gather_base_records(
        &self,
        gate: &ConcurrencyGate,
        aggregator: &ResultAggregator,
        domain: &str,
        timeout: Duration,
    ) -> BaseRecordTally {
        let mut tally = BaseRecordTally::default();
        gate.drive(
            RecordType::iter(),
            |record_type| {
                let adapter = self.adapter.clone();
                let domain = domain.to_string();
                let record_type = *record_type;
                async move { adapter.resolve(&domain, record_type, timeout).await }
            },
            |record_type, result| match result {
                Ok(outcome) => {
                    match &outcome.status {
                        QueryStatus::Resolved(values) => {
                            debug!("{domain} {record_type}: {} values", values.len());
                        }
                        other => debug!("{domain} {record_type}: {other:?}"),
                    }
                    tally.record(&outcome.status);
                    aggregator.merge(&outcome);
                }
                Err(e) => {
                    tally.errors += 1;
                    warn!("{record_type} query for {domain} panicked: {e:?}");
                }
            },
        )
        .await;
        tally
    }

    async fn enumerate(
        &self,
        gate: &ConcurrencyGate,
        aggregator: &ResultAggregator,
        statistics: &ScanStatistics,
        wordlist: &Wordlist,
        timeout: Duration,
    ) {
        let summary = gate
            .drive(
                candidates(wordlist, self.target.domain()),
                |candidate| {
                    statistics.record_dispatch();
                    let adapter = self.adapter.clone();
                    let name = candidate.as_str().to_string();
                    async move { adapter.resolve(&name, RecordType::A, timeout).await }
                },
                |candidate, result| match result {
                    Ok(outcome) => {
                        statistics.record_outcome(&outcome.status);
                        if aggregator.merge(&outcome) {
                            self.observer.on_hit(&SubdomainHit {
                                hostname: outcome.name.clone(),
                                values: outcome.values().to_vec(),
                            });
                        }
                    }
                    Err(e) => {
                        statistics.record_panic();
                        warn!("Task panicked for {candidate}: {e:?}");
                    }
                },
            )
            .await;
        debug!(
            "Enumeration dispatched {} of {} candidates",
            summary.dispatched,
            wordlist.len()
        );
    }
}

/// Status mix of the base-record queries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BaseRecordTally {
    resolved: usize,
    not_found: usize,
    timeouts: usize,
    errors: usize,
}

impl BaseRecordTally {
    fn record(&mut self, status: &QueryStatus) {
        match status {
            QueryStatus::Resolved(_) => self.resolved += 1,
            QueryStatus::NotFound => self.not_found += 1,
            QueryStatus::Timeout => self.timeouts += 1,
            QueryStatus::Error(_) => self.errors += 1,
        }
    }
}

impl std::fmt::Display for BaseRecordTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} resolved, {} not found, {} timed out, {} failed",
            self.resolved, self.not_found, self.timeouts, self.errors
        )
    }
}

/// Forward-only phase state, reported to the observer.
struct PhaseTracker {
    current: ScanPhase,
    observer: Arc<dyn ScanObserver>,
}

impl PhaseTracker {
    fn new(observer: Arc<dyn ScanObserver>) -> Self {
        observer.on_phase(ScanPhase::Initialized);
        Self {
            current: ScanPhase::Initialized,
            observer,
        }
    }

    fn advance(&mut self, next: ScanPhase) {
        debug_assert!(next > self.current, "{} -> {}", self.current, next);
        debug!("Scan phase: {} -> {}", self.current, next);
        self.current = next;
        self.observer.on_phase(next);
    }
}

fn spawn_progress_logging(
    statistics: Arc<ScanStatistics>,
    gate: ConcurrencyGate,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(PROGRESS_INTERVAL_SECS));
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(statistics.start(), &statistics, gate.in_flight());
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}
