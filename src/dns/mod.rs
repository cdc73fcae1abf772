//! DNS resolution and zone-transfer testing.
//!
//! This module provides the resolver adapter used by the scan engine:
//! - `DnsResolver`: the underlying query capability (record lookups, AXFR)
//! - `ResolverAdapter`: per-query timeouts and outcome classification
//! - `HickoryResolver`: the production implementation on `hickory-resolver`
//!
//! Record lookups go through the configured upstream resolvers; zone
//! transfers connect directly to the domain's authoritative nameservers.

mod hickory;
mod resolver;
mod types;
mod zone_transfer;

// Re-export public API
pub use hickory::HickoryResolver;
pub use resolver::{DnsResolver, ResolverAdapter};
pub use types::{LookupError, QueryOutcome, QueryStatus, RecordType, ZoneTransferFinding};
