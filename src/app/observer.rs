//! Live console output while a scan runs.

use colored::Colorize;
use log::info;

use crate::aggregate::SubdomainHit;
use crate::dns::ZoneTransferFinding;
use crate::scan::{ScanObserver, ScanPhase};

/// Prints each discovered subdomain as soon as it is found.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl ScanObserver for ConsoleObserver {
    fn on_phase(&self, phase: ScanPhase) {
        match phase {
            ScanPhase::GatheringBaseRecords => info!("Gathering DNS records..."),
            ScanPhase::TestingZoneTransfer => info!("Checking for zone transfer..."),
            ScanPhase::Enumerating => info!("Starting subdomain brute force"),
            _ => {}
        }
    }

    fn on_hit(&self, hit: &SubdomainHit) {
        println!(
            "{} {} -> {}",
            "Found:".green().bold(),
            hit.hostname,
            hit.values.join(", ")
        );
    }

    fn on_zone_transfer(&self, finding: &ZoneTransferFinding) {
        if let (true, Some(nameserver)) = (finding.vulnerable, &finding.nameserver) {
            println!(
                "{} zone transfer permitted by {}",
                "Vulnerable:".red().bold(),
                nameserver
            );
        }
    }
}
