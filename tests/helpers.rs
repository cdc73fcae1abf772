// Shared test helpers: an in-memory resolver with instrumentation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use dns_recon::config::WordlistSource;
use dns_recon::{DnsResolver, LookupError, RecordType, ScanTarget, Wordlist};

/// Resolver backed by canned answers.
///
/// Tracks how many lookups are executing at once and can cancel a token once
/// a given number of candidate lookups has started.
#[derive(Default)]
pub struct StubResolver {
    domain: String,
    answers: HashMap<(String, RecordType), Vec<String>>,
    transfers: HashMap<String, Vec<String>>,
    slow: HashSet<String>,
    hang_transfers: bool,
    delay: Duration,
    cancel_after: Option<(usize, CancellationToken)>,
    pub current: AtomicUsize,
    pub peak: AtomicUsize,
    pub candidate_lookups: AtomicUsize,
    pub transfer_attempts: AtomicUsize,
}

#[allow(dead_code)] // Each test file uses a subset
impl StubResolver {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..Default::default()
        }
    }

    /// The `example.com` fixture: base A record plus `www` and `mail`.
    pub fn example_com() -> Self {
        Self::new("example.com")
            .with_record("example.com", RecordType::A, &["93.184.216.34"])
            .with_record("www.example.com", RecordType::A, &["93.184.216.34"])
            .with_record("mail.example.com", RecordType::A, &["93.184.216.35"])
    }

    pub fn with_record(mut self, name: &str, rt: RecordType, values: &[&str]) -> Self {
        self.answers.insert(
            (name.to_string(), rt),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn with_transfer(mut self, nameserver: &str, records: &[&str]) -> Self {
        self.transfers.insert(
            nameserver.to_string(),
            records.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    /// Names that never answer; the adapter timeout has to fire.
    pub fn with_slow(mut self, name: &str) -> Self {
        self.slow.insert(name.to_string());
        self
    }

    /// Zone transfers that never answer.
    pub fn with_hanging_transfers(mut self) -> Self {
        self.hang_transfers = true;
        self
    }

    /// Delay applied to every lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Cancels `token` when the `count`-th candidate lookup starts.
    pub fn cancel_after(mut self, count: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((count, token));
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

struct Inflight<'a>(&'a AtomicUsize);

impl Drop for Inflight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DnsResolver for StubResolver {
    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupError> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _inflight = Inflight(&self.current);

        if name != self.domain {
            let started = self.candidate_lookups.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((count, token)) = &self.cancel_after {
                if started == *count {
                    token.cancel();
                }
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.slow.contains(name) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        self.answers
            .get(&(name.to_string(), record_type))
            .cloned()
            .ok_or(LookupError::NotFound)
    }

    async fn zone_transfer(
        &self,
        _domain: &str,
        nameserver: &str,
    ) -> Result<Vec<String>, LookupError> {
        self.transfer_attempts.fetch_add(1, Ordering::SeqCst);
        if self.hang_transfers {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.transfers
            .get(nameserver)
            .cloned()
            .ok_or_else(|| LookupError::Transport("transfer refused".into()))
    }
}

/// Target for `example.com` with the given thread count and timeout.
#[allow(dead_code)]
pub fn target(threads: usize, timeout: Duration) -> ScanTarget {
    ScanTarget::new("example.com", threads, timeout, WordlistSource::BuiltInQuick)
        .expect("valid target")
}

/// Wordlist of `count` labels, none of which resolve in the fixtures.
#[allow(dead_code)]
pub fn numbered_wordlist(count: usize) -> Wordlist {
    Wordlist::from_labels((0..count).map(|i| format!("host{i}")))
}

#[allow(dead_code)]
pub fn shared(resolver: StubResolver) -> Arc<StubResolver> {
    Arc::new(resolver)
}
