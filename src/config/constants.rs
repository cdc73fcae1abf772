//! Configuration constants.
//!
//! Defaults and limits for scans, used both by the library `Config` and the
//! CLI option defaults.

/// Default number of concurrent in-flight queries
pub const DEFAULT_THREADS: usize = 10;
/// Lowest accepted thread count
pub const MIN_THREADS: usize = 1;
/// Highest accepted thread count
pub const MAX_THREADS: usize = 100;

/// Per-query timeout in seconds for a full scan
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 2;
/// Per-query timeout in seconds when quick mode is enabled
pub const QUICK_QUERY_TIMEOUT_SECS: u64 = 1;

/// Attempts made by the underlying resolver for each query.
/// Kept at 1 so the per-query timeout is the only retry budget.
pub const RESOLVER_ATTEMPTS: usize = 1;

/// Standard DNS port used for zone-transfer connections and nameserver overrides
pub const DNS_PORT: u16 = 53;

/// Upper bound on records accepted from a single zone transfer
pub const MAX_ZONE_TRANSFER_RECORDS: usize = 100_000;

/// Interval between progress log lines, in seconds
pub const PROGRESS_INTERVAL_SECS: u64 = 5;

/// Maximum length of a full domain name
pub const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length of a single label
pub const MAX_LABEL_LENGTH: usize = 63;
