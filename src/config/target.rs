//! Validated, immutable scan parameters.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::constants::{
    DEFAULT_QUERY_TIMEOUT_SECS, MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH, MAX_THREADS, MIN_THREADS,
    QUICK_QUERY_TIMEOUT_SECS,
};
use crate::config::Config;
use crate::error_handling::ScanError;

/// Where candidate labels come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordlistSource {
    /// User-supplied wordlist file
    File(PathBuf),
    /// Default built-in list
    BuiltIn,
    /// Reduced built-in list used by quick mode
    BuiltInQuick,
}

/// Everything a scan needs to know, validated once at scan start.
///
/// Built from a [`Config`] by [`ScanTarget::from_config`]; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct ScanTarget {
    domain: String,
    nameservers: Vec<IpAddr>,
    concurrency: usize,
    query_timeout: Duration,
    source: WordlistSource,
}

impl ScanTarget {
    /// Validates `config` and applies the quick-mode preset.
    ///
    /// Quick mode selects the reduced built-in wordlist (unless a custom
    /// wordlist is given) and the quick timeout (unless an explicit timeout
    /// is given).
    ///
    /// # Errors
    ///
    /// Returns a fatal configuration error for an invalid domain, a thread
    /// count outside `1..=100`, or a zero timeout.
    pub fn from_config(config: &Config) -> Result<Self, ScanError> {
        let domain = normalize_domain(&config.domain)?;

        if !(MIN_THREADS..=MAX_THREADS).contains(&config.threads) {
            return Err(ScanError::InvalidThreadCount(config.threads));
        }

        let timeout_secs = match (config.timeout_secs, config.quick) {
            (Some(secs), _) => secs,
            (None, true) => QUICK_QUERY_TIMEOUT_SECS,
            (None, false) => DEFAULT_QUERY_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ScanError::InvalidTimeout);
        }

        let source = match (&config.wordlist, config.quick) {
            (Some(path), _) => WordlistSource::File(path.clone()),
            (None, true) => WordlistSource::BuiltInQuick,
            (None, false) => WordlistSource::BuiltIn,
        };

        Ok(Self {
            domain,
            nameservers: config.nameservers.clone(),
            concurrency: config.threads,
            query_timeout: Duration::from_secs(timeout_secs),
            source,
        })
    }

    /// Builds a target directly, for callers that bypass `Config`.
    ///
    /// The same domain and limit validation applies.
    pub fn new(
        domain: &str,
        concurrency: usize,
        query_timeout: Duration,
        source: WordlistSource,
    ) -> Result<Self, ScanError> {
        let domain = normalize_domain(domain)?;
        if !(MIN_THREADS..=MAX_THREADS).contains(&concurrency) {
            return Err(ScanError::InvalidThreadCount(concurrency));
        }
        if query_timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }
        Ok(Self {
            domain,
            nameservers: Vec::new(),
            concurrency,
            query_timeout,
            source,
        })
    }

    /// Replaces the upstream resolver list.
    pub fn with_nameservers(mut self, nameservers: Vec<IpAddr>) -> Self {
        self.nameservers = nameservers;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn nameservers(&self) -> &[IpAddr] {
        &self.nameservers
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    pub fn source(&self) -> &WordlistSource {
        &self.source
    }
}

/// Lowercases, trims and strips the root dot, then checks hostname syntax.
fn normalize_domain(raw: &str) -> Result<String, ScanError> {
    let invalid = |reason: &str| ScanError::InvalidDomain {
        domain: raw.to_string(),
        reason: reason.to_string(),
    };

    let domain = raw.trim().trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return Err(invalid("domain is empty"));
    }
    if domain.len() > MAX_DOMAIN_LENGTH {
        return Err(invalid("domain exceeds 253 characters"));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(invalid("label exceeds 63 characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("label starts or ends with a hyphen"));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("label contains invalid characters"));
        }
    }

    Ok(domain)
}
