//! Result types published by a scan.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dns::{RecordType, ZoneTransferFinding};
use crate::scan::StatisticsSnapshot;

/// Base-domain records keyed by type.
///
/// Keys iterate in report order (`A, AAAA, CNAME, MX, TXT, NS`). Values keep
/// first-seen order and contain no duplicates. Types with no records are
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DnsRecordSet {
    records: BTreeMap<RecordType, Vec<String>>,
}

impl DnsRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds values for a type, skipping ones already present.
    ///
    /// Returns the number of values actually added.
    pub fn insert(&mut self, record_type: RecordType, values: &[String]) -> usize {
        if values.is_empty() {
            return 0;
        }
        let existing = self.records.entry(record_type).or_default();
        let mut added = 0;
        for value in values {
            if !existing.contains(value) {
                existing.push(value.clone());
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, record_type: RecordType) -> Option<&[String]> {
        self.records.get(&record_type).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of record types present.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordType, &[String])> {
        self.records.iter().map(|(rt, values)| (*rt, values.as_slice()))
    }
}

/// A discovered subdomain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdomainHit {
    #[serde(rename = "subdomain")]
    pub hostname: String,
    #[serde(rename = "ips")]
    pub values: Vec<String>,
}

/// Immutable outcome of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub domain: String,
    /// Scan start time
    pub timestamp: DateTime<Utc>,
    pub dns_records: DnsRecordSet,
    /// Hits in discovery order, one per hostname
    pub subdomains: Vec<SubdomainHit>,
    pub zone_transfer: ZoneTransferFinding,
    pub statistics: StatisticsSnapshot,
    /// The scan was stopped before every candidate was tried
    pub cancelled: bool,
}

impl ScanResult {
    pub fn hit(&self, hostname: &str) -> Option<&SubdomainHit> {
        self.subdomains.iter().find(|hit| hit.hostname == hostname)
    }
}
