//! Final statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, FailureStats};
use crate::scan::StatisticsSnapshot;

/// Prints per-kind failure counts to the log.
pub fn print_failure_statistics(failure_stats: &FailureStats) {
    let total_failures = failure_stats.total();
    if total_failures == 0 {
        return;
    }

    info!("Failure Counts ({} total):", total_failures);
    for kind in FailureKind::iter() {
        let count = failure_stats.get(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}

/// Prints a one-line summary of the scan.
pub fn print_simple_summary(domain: &str, hits: usize, stats: &StatisticsSnapshot) {
    info!(
        "✅ Scanned {} ({} subdomain{} found, {} of {} queries resolved) in {:.1}s",
        domain,
        hits,
        if hits == 1 { "" } else { "s" },
        stats.successful,
        stats.total,
        stats.elapsed.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanStatistics;

    #[test]
    fn test_print_failure_statistics_no_failures() {
        let stats = FailureStats::new();
        // Should not panic when there are no failures
        print_failure_statistics(&stats);
    }

    #[test]
    fn test_print_failure_statistics_with_failures() {
        let stats = FailureStats::new();
        stats.increment(FailureKind::NotFound);
        stats.increment(FailureKind::NotFound);
        stats.increment(FailureKind::Timeout);
        print_failure_statistics(&stats);
    }

    #[test]
    fn test_print_simple_summary() {
        let stats = ScanStatistics::new().freeze();
        print_simple_summary("example.com", 0, &stats);
        print_simple_summary("example.com", 1, &stats);
    }
}
