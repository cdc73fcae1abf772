//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with the
//! scan's timeout and upstream configuration.

use std::sync::Arc;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::{debug, warn};

use crate::config::{ScanTarget, DNS_PORT, RESOLVER_ATTEMPTS};
use crate::dns::HickoryResolver;

/// Builds the resolver configuration and options for a target.
///
/// Upstreams are, in order of preference: the target's nameserver override,
/// the system configuration, and the hickory default (Google public DNS)
/// when the system configuration cannot be read.
pub fn resolver_config(target: &ScanTarget) -> (ResolverConfig, ResolverOpts) {
    let config = if !target.nameservers().is_empty() {
        debug!("Using upstream resolvers {:?}", target.nameservers());
        ResolverConfig::from_parts(
            None,
            Vec::new(),
            NameServerConfigGroup::from_ips_clear(target.nameservers(), DNS_PORT, true),
        )
    } else {
        match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, _)) => config,
            Err(e) => {
                warn!("Failed to read system DNS configuration ({e}); using default resolvers");
                ResolverConfig::default()
            }
        }
    };

    let mut opts = ResolverOpts::default();
    opts.timeout = target.query_timeout();
    opts.attempts = RESOLVER_ATTEMPTS;
    // Set ndots to 0 so candidates are never expanded with search domains
    opts.ndots = 0;

    (config, opts)
}

/// Initializes the DNS resolver used by a scan.
///
/// The resolver is wrapped in `Arc` for sharing across tasks.
pub fn init_resolver(target: &ScanTarget) -> Arc<HickoryResolver> {
    let (config, opts) = resolver_config(target);
    Arc::new(HickoryResolver::new(TokioAsyncResolver::tokio(config, opts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WordlistSource;
    use std::net::IpAddr;
    use std::time::Duration;

    fn target() -> ScanTarget {
        ScanTarget::new(
            "example.com",
            10,
            Duration::from_secs(3),
            WordlistSource::BuiltInQuick,
        )
        .expect("valid target")
    }

    #[test]
    fn test_options_follow_target() {
        let (_, opts) = resolver_config(&target());
        assert_eq!(opts.timeout, Duration::from_secs(3));
        assert_eq!(opts.attempts, RESOLVER_ATTEMPTS);
        assert_eq!(opts.ndots, 0);
    }

    #[test]
    fn test_nameserver_override() {
        let ip: IpAddr = "1.1.1.1".parse().expect("ip");
        let target = target().with_nameservers(vec![ip]);
        let (config, _) = resolver_config(&target);
        // One UDP and one TCP entry per address
        assert_eq!(config.name_servers().len(), 2);
        assert!(config
            .name_servers()
            .iter()
            .all(|ns| ns.socket_addr.ip() == ip && ns.socket_addr.port() == DNS_PORT));
    }

    #[tokio::test]
    async fn test_init_resolver() {
        let _resolver = init_resolver(&target());
    }
}
