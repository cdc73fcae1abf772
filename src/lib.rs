//! dns_recon library: concurrent DNS reconnaissance
//!
//! This library gathers the DNS records of a target domain, tests its
//! nameservers for zone-transfer (AXFR) misconfiguration, and brute-forces
//! subdomains from a wordlist with bounded concurrency.
//!
//! # Example
//!
//! ```no_run
//! use dns_recon::{run_scan, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     threads: 20,
//!     ..Default::default()
//! };
//!
//! let result = run_scan(config, CancellationToken::new()).await?;
//! println!("Found {} subdomains: {} of {} queries resolved",
//!          result.subdomains.len(), result.statistics.successful, result.statistics.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod aggregate;
pub mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod export;
pub mod gate;
pub mod initialization;
pub mod scan;
pub mod wordlist;

use std::sync::Arc;

use log::info;
use tokio_util::sync::CancellationToken;

// Re-export public API
pub use aggregate::{DnsRecordSet, ScanResult, SubdomainHit};
pub use config::{Config, LogFormat, LogLevel, ScanTarget, WordlistSource};
pub use dns::{DnsResolver, LookupError, QueryOutcome, QueryStatus, RecordType};
pub use error_handling::ScanError;
pub use scan::{NoopObserver, ScanEngine, ScanObserver, ScanPhase};
pub use wordlist::Wordlist;

/// Runs a scan with the provided configuration against live DNS.
///
/// Validates `config`, loads the wordlist and builds the resolver, then runs
/// the scan to completion or until `cancel` fires.
///
/// # Errors
///
/// This function will return an error if:
/// - The configuration is invalid (domain, thread count, timeout)
/// - A custom wordlist cannot be read or is empty
/// - The target domain has no DNS records at all
pub async fn run_scan(config: Config, cancel: CancellationToken) -> Result<ScanResult, ScanError> {
    run_scan_with_observer(config, cancel, Arc::new(NoopObserver)).await
}

/// Like [`run_scan`], reporting live events to `observer`.
pub async fn run_scan_with_observer(
    config: Config,
    cancel: CancellationToken,
    observer: Arc<dyn ScanObserver>,
) -> Result<ScanResult, ScanError> {
    let target = ScanTarget::from_config(&config)?;
    let wordlist = Wordlist::from_source(target.source()).await?;
    let resolver = initialization::init_resolver(&target);
    info!("Starting scan of {}", target.domain());

    ScanEngine::new(target, resolver)
        .with_observer(observer)
        .run(&wordlist, cancel)
        .await
}
