//! Bounded-concurrency scheduling of resolver work.
//!
//! The gate owns one semaphore sized to the configured thread count. Every
//! piece of network work in a scan (base-record queries, the zone-transfer
//! check, candidate resolution) runs while holding one of its permits, so the
//! thread budget is shared across phases.
//!
//! Items are pulled from the input iterator only after a permit has been
//! acquired, which bounds memory to the in-flight set regardless of wordlist
//! size. Completions are delivered in completion order, paired with the item
//! that produced them.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Counts reported by [`ConcurrencyGate::drive`] once all dispatched work has
/// completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateSummary {
    /// Items pulled from the input and spawned
    pub dispatched: usize,
    /// Items whose completion was delivered
    pub completed: usize,
    /// Whether pulling stopped because of cancellation
    pub cancelled: bool,
}

/// Semaphore-backed scheduler shared by all phases of a scan.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
    cancel: CancellationToken,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl ConcurrencyGate {
    /// Creates a gate allowing at most `limit` concurrent items.
    ///
    /// A limit of zero is raised to one so the gate can always make progress.
    pub fn new(limit: usize, cancel: CancellationToken) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
            cancel,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Token observed before each item is pulled.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Items currently executing.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of items observed executing at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Runs `dispatch(&item)` for every item of `items` under the gate.
    ///
    /// `dispatch` is called at the moment an item is pulled (i.e. once a
    /// permit is held); the future it returns is spawned and keeps the permit
    /// until it finishes. `on_complete` receives each item with its result as
    /// soon as it completes; a panicking task is reported as `Err(JoinError)`
    /// with its item.
    ///
    /// On cancellation no further items are pulled; already spawned work is
    /// awaited so the summary and all completions cover exactly the
    /// dispatched items.
    pub async fn drive<I, F, Fut, C>(
        &self,
        items: I,
        mut dispatch: F,
        mut on_complete: C,
    ) -> GateSummary
    where
        I: IntoIterator,
        I::Item: Send + 'static,
        F: FnMut(&I::Item) -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
        C: FnMut(I::Item, Result<Fut::Output, JoinError>),
    {
        let mut items = items.into_iter();
        let mut tasks = FuturesUnordered::new();
        let mut summary = GateSummary::default();

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    debug!("Gate cancelled after {} dispatched items", summary.dispatched);
                    summary.cancelled = true;
                    break;
                }

                Some((item, result)) = tasks.next(), if !tasks.is_empty() => {
                    summary.completed += 1;
                    on_complete(item, result);
                }

                permit = Arc::clone(&self.semaphore).acquire_owned() => {
                    let permit = match permit {
                        Ok(permit) => permit,
                        Err(_) => {
                            warn!("Gate semaphore closed; no further items will be pulled");
                            break;
                        }
                    };
                    // Re-check after the permit wait so a cancel that raced the
                    // acquisition never dispatches another item.
                    if self.cancel.is_cancelled() {
                        summary.cancelled = true;
                        break;
                    }
                    let Some(item) = items.next() else {
                        break;
                    };

                    summary.dispatched += 1;
                    let handle = self.spawn_with_permit(permit, dispatch(&item));
                    tasks.push(async move { (item, handle.await) });
                }
            }
        }

        while let Some((item, result)) = tasks.next().await {
            summary.completed += 1;
            on_complete(item, result);
        }

        summary
    }

    /// Runs a single future under the gate.
    ///
    /// Returns `None` if the gate was cancelled before a permit was obtained
    /// or the task panicked.
    pub async fn run<Fut>(&self, work: Fut) -> Option<Fut::Output>
    where
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        if self.cancel.is_cancelled() {
            return None;
        }
        let permit = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return None,
            permit = Arc::clone(&self.semaphore).acquire_owned() => permit.ok()?,
        };

        match self.spawn_with_permit(permit, work).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Gated task panicked: {e}");
                None
            }
        }
    }

    fn spawn_with_permit<Fut>(
        &self,
        permit: OwnedSemaphorePermit,
        work: Fut,
    ) -> JoinHandle<Fut::Output>
    where
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        let in_flight = Arc::clone(&self.in_flight);
        let peak = Arc::clone(&self.peak_in_flight);
        tokio::spawn(async move {
            let _permit = permit;
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            let _guard = InFlightGuard(in_flight);
            work.await
        })
    }
}

/// Decrements the in-flight counter when a task finishes, even by panic.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_drive_completes_all_items() {
        let gate = ConcurrencyGate::new(3, CancellationToken::new());
        let mut seen = Vec::new();
        let summary = gate
            .drive(
                0..20u32,
                |n| {
                    let n = *n;
                    async move { n * 2 }
                },
                |item, result| seen.push((item, result.expect("no panic"))),
            )
            .await;

        assert_eq!(summary.dispatched, 20);
        assert_eq!(summary.completed, 20);
        assert!(!summary.cancelled);
        seen.sort();
        assert_eq!(seen, (0..20u32).map(|n| (n, n * 2)).collect::<Vec<_>>());
        assert_eq!(gate.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_drive_respects_limit() {
        let gate = ConcurrencyGate::new(4, CancellationToken::new());
        let current = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        gate.drive(
            0..50,
            |_| {
                let current = Arc::clone(&current);
                let max_seen = Arc::clone(&max_seen);
                async move {
                    let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    current.fetch_sub(1, Ordering::SeqCst);
                }
            },
            |_, _| {},
        )
        .await;

        assert!(max_seen.load(Ordering::SeqCst) <= 4);
        assert!(gate.peak_in_flight() <= 4);
        assert!(gate.peak_in_flight() >= 1);
    }

    #[tokio::test]
    async fn test_drive_pulls_lazily() {
        let gate = ConcurrencyGate::new(2, CancellationToken::new());
        let pulled = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));
        let pulled_in_iter = Arc::clone(&pulled);
        let items = (0..100).inspect(move |_| {
            pulled_in_iter.fetch_add(1, Ordering::SeqCst);
        });

        gate.drive(
            items,
            |_| {
                let pulled = Arc::clone(&pulled);
                let completed = Arc::clone(&completed);
                async move {
                    // Never more than limit items ahead of completions.
                    let ahead = pulled.load(Ordering::SeqCst) - completed.load(Ordering::SeqCst);
                    assert!(ahead <= 2, "pulled {ahead} items ahead");
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    completed.fetch_add(1, Ordering::SeqCst);
                }
            },
            |_, _| {},
        )
        .await;
        assert_eq!(completed.load(Ordering::SeqCst), 100);
    }

    #[tokio::test]
    async fn test_drive_reports_panics_with_item() {
        let gate = ConcurrencyGate::new(2, CancellationToken::new());
        let mut failures = Vec::new();
        let summary = gate
            .drive(
                0..4,
                |n| {
                    let n = *n;
                    async move {
                        if n == 2 {
                            panic!("boom");
                        }
                        n
                    }
                },
                |item, result| {
                    if result.is_err() {
                        failures.push(item);
                    }
                },
            )
            .await;
        assert_eq!(summary.completed, 4);
        assert_eq!(failures, [2]);
        assert_eq!(gate.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_gate_dispatches_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let gate = ConcurrencyGate::new(2, cancel);
        let summary = gate.drive(0..10, |_| async {}, |_, _| {}).await;
        assert_eq!(summary.dispatched, 0);
        assert!(summary.cancelled);
        assert_eq!(gate.run(async { 1 }).await, None);
    }

    #[tokio::test]
    async fn test_cancel_mid_run_lets_in_flight_finish() {
        let cancel = CancellationToken::new();
        let gate = ConcurrencyGate::new(2, cancel.clone());
        let mut completed = 0;
        let summary = gate
            .drive(
                0..1000,
                |n| {
                    let n = *n;
                    let cancel = cancel.clone();
                    async move {
                        if n == 5 {
                            cancel.cancel();
                        }
                        tokio::time::sleep(Duration::from_millis(2)).await;
                    }
                },
                |_, _| completed += 1,
            )
            .await;
        assert!(summary.cancelled);
        assert!(summary.dispatched < 1000);
        assert_eq!(summary.completed, summary.dispatched);
        assert_eq!(completed, summary.dispatched);
    }

    #[tokio::test]
    async fn test_zero_limit_is_raised_to_one() {
        let gate = ConcurrencyGate::new(0, CancellationToken::new());
        assert_eq!(gate.limit(), 1);
        assert_eq!(gate.run(async { 7 }).await, Some(7));
    }
}
