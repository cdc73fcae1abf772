//! Resolver trait and the timeout-enforcing adapter around it.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::types::{LookupError, QueryOutcome, QueryStatus, RecordType, ZoneTransferFinding};

/// Underlying DNS query capability.
///
/// Implementations only perform the protocol work; timeouts and outcome
/// classification are applied uniformly by [`ResolverAdapter`].
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Queries `name` for `record_type` and returns the record values as text.
    async fn lookup(&self, name: &str, record_type: RecordType)
        -> Result<Vec<String>, LookupError>;

    /// Requests a full zone transfer of `domain` from `nameserver`.
    async fn zone_transfer(&self, domain: &str, nameserver: &str)
        -> Result<Vec<String>, LookupError>;
}

/// Uniform, timeout-bounded access to a [`DnsResolver`].
///
/// Cheap to clone; clones share the same underlying resolver. Holds no
/// mutable state.
#[derive(Clone)]
pub struct ResolverAdapter {
    inner: Arc<dyn DnsResolver>,
}

impl ResolverAdapter {
    pub fn new(inner: Arc<dyn DnsResolver>) -> Self {
        Self { inner }
    }

    /// Resolves one name for one record type within `timeout`.
    ///
    /// An empty answer is reported as `NotFound`. Values are deduplicated,
    /// keeping response order.
    pub async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
        timeout: Duration,
    ) -> QueryOutcome {
        let status = match tokio::time::timeout(timeout, self.inner.lookup(name, record_type)).await
        {
            Err(_) => QueryStatus::Timeout,
            Ok(Ok(values)) => {
                let values = dedup_preserving_order(values);
                if values.is_empty() {
                    QueryStatus::NotFound
                } else {
                    QueryStatus::Resolved(values)
                }
            }
            Ok(Err(LookupError::NotFound)) => QueryStatus::NotFound,
            Ok(Err(LookupError::Timeout)) => QueryStatus::Timeout,
            Ok(Err(LookupError::Transport(reason))) => QueryStatus::Error(reason),
        };
        QueryOutcome::new(name, record_type, status)
    }

    /// Attempts a zone transfer from a single nameserver within `timeout`.
    pub async fn attempt_zone_transfer(
        &self,
        domain: &str,
        nameserver: &str,
        timeout: Duration,
    ) -> ZoneTransferFinding {
        match tokio::time::timeout(timeout, self.inner.zone_transfer(domain, nameserver)).await {
            Ok(Ok(records)) if !records.is_empty() => {
                info!(
                    "Zone transfer successful from {nameserver} ({} records)",
                    records.len()
                );
                ZoneTransferFinding::positive(nameserver, records)
            }
            Ok(Ok(_)) => {
                debug!("Zone transfer from {nameserver} returned no records");
                ZoneTransferFinding::negative()
            }
            Ok(Err(e)) => {
                debug!("Zone transfer refused by {nameserver}: {e}");
                ZoneTransferFinding::negative()
            }
            Err(_) => {
                debug!("Zone transfer from {nameserver} timed out");
                ZoneTransferFinding::negative()
            }
        }
    }

    /// Tests every authoritative nameserver of `domain` for AXFR, in order.
    ///
    /// The nameservers come from an NS lookup. The first nameserver that
    /// permits the transfer wins; if none does, or the NS lookup fails, the
    /// finding is negative.
    ///
    /// Once `cancel` fires no further nameserver is tried; the attempt in
    /// flight still ends within `timeout`.
    pub async fn test_zone_transfer(
        &self,
        domain: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> ZoneTransferFinding {
        if cancel.is_cancelled() {
            return ZoneTransferFinding::negative();
        }
        let ns_outcome = self.resolve(domain, RecordType::NS, timeout).await;
        let nameservers = match ns_outcome.status {
            QueryStatus::Resolved(nameservers) => nameservers,
            other => {
                warn!("Zone transfer check skipped for {domain}: NS lookup failed ({other:?})");
                return ZoneTransferFinding::negative();
            }
        };

        for nameserver in &nameservers {
            if cancel.is_cancelled() {
                debug!("Zone transfer check of {domain} cancelled before {nameserver}");
                return ZoneTransferFinding::negative();
            }
            let finding = self.attempt_zone_transfer(domain, nameserver, timeout).await;
            if finding.vulnerable {
                return finding;
            }
        }
        debug!(
            "No nameserver of {domain} permitted a zone transfer ({} tried)",
            nameservers.len()
        );
        ZoneTransferFinding::negative()
    }
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
