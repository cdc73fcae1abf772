//! Query and finding types shared by the resolver adapter and the scan engine.

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Record types queried by a scan.
///
/// Variant order is the display order used in reports.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    NS,
}

impl From<RecordType> for hickory_resolver::proto::rr::RecordType {
    fn from(rt: RecordType) -> Self {
        use hickory_resolver::proto::rr::RecordType as Rt;
        match rt {
            RecordType::A => Rt::A,
            RecordType::AAAA => Rt::AAAA,
            RecordType::CNAME => Rt::CNAME,
            RecordType::MX => Rt::MX,
            RecordType::TXT => Rt::TXT,
            RecordType::NS => Rt::NS,
        }
    }
}

/// Failure reported by a [`DnsResolver`](super::DnsResolver) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name (or the requested type for that name) does not exist.
    #[error("no records found")]
    NotFound,

    /// The transport gave up waiting for a response.
    #[error("query timed out")]
    Timeout,

    /// Any other protocol or transport fault.
    #[error("{0}")]
    Transport(String),
}

/// Status of a single resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// Records were returned; values are deduplicated in response order.
    Resolved(Vec<String>),
    /// The name or record type does not exist. Expected during brute force.
    NotFound,
    /// No answer within the per-query timeout.
    Timeout,
    /// Protocol or transport failure, with a description.
    Error(String),
}

/// Result of one resolver call. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub name: String,
    pub record_type: RecordType,
    pub status: QueryStatus,
}

impl QueryOutcome {
    pub fn new(name: impl Into<String>, record_type: RecordType, status: QueryStatus) -> Self {
        Self {
            name: name.into(),
            record_type,
            status,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, QueryStatus::Resolved(_))
    }

    /// Resolved values, empty for every non-`Resolved` status.
    pub fn values(&self) -> &[String] {
        match &self.status {
            QueryStatus::Resolved(values) => values,
            _ => &[],
        }
    }
}

/// Whether any nameserver permitted a full zone transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneTransferFinding {
    /// True when at least one nameserver answered the AXFR request
    pub vulnerable: bool,
    /// Nameserver that permitted the transfer
    pub nameserver: Option<String>,
    /// Records leaked by the transfer, in transfer order
    pub records: Vec<String>,
}

impl ZoneTransferFinding {
    /// No nameserver permitted the transfer.
    pub fn negative() -> Self {
        Self::default()
    }

    pub fn positive(nameserver: impl Into<String>, records: Vec<String>) -> Self {
        Self {
            vulnerable: true,
            nameserver: Some(nameserver.into()),
            records,
        }
    }
}
