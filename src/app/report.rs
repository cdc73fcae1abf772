//! Console rendering of a finished scan.

use std::fmt;

use colored::{ColoredString, Colorize};

use crate::aggregate::ScanResult;

const RULE_WIDTH: usize = 63;

/// Renders a result as the multi-section console report.
///
/// Colors follow the global `colored` override, so `--no-color` output is
/// plain text.
pub fn render_report(result: &ScanResult) -> String {
    Report(result).to_string()
}

/// Renders the startup header printed before a scan begins.
pub fn render_banner() -> String {
    StartBanner.to_string()
}

struct StartBanner;

impl fmt::Display for StartBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("dns_recon v{}", env!("CARGO_PKG_VERSION"));
        banner(f, &title, |s| s.magenta().bold())?;
        write!(f, "{:^width$}", "Concurrent DNS reconnaissance", width = RULE_WIDTH + 2)
    }
}

struct Report<'a>(&'a ScanResult);

fn banner(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    paint: fn(&str) -> ColoredString,
) -> fmt::Result {
    let rule = "═".repeat(RULE_WIDTH);
    writeln!(f)?;
    writeln!(f, "{}", paint(&format!("╔{rule}╗")))?;
    writeln!(f, "{}", paint(&format!("║{title:^width$}║", width = RULE_WIDTH)))?;
    writeln!(f, "{}", paint(&format!("╚{rule}╝")))
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        banner(f, "DNS RECON REPORT", |s| s.cyan())?;
        writeln!(f)?;
        writeln!(f, "{} {}", "Target Domain:".bold(), result.domain)?;
        writeln!(
            f,
            "{} {}",
            "Scan Date:".bold(),
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            f,
            "{} {}",
            "Total Subdomains Found:".bold(),
            result.subdomains.len()
        )?;
        if result.cancelled {
            writeln!(f, "{}", "Scan was cancelled; results are partial.".yellow())?;
        }

        banner(f, "DNS RECORDS", |s| s.green())?;
        if result.dns_records.is_empty() {
            writeln!(f, "\n  (none)")?;
        }
        for (record_type, values) in result.dns_records.iter() {
            writeln!(f)?;
            writeln!(f, "{}", format!("{record_type} Records:").bold())?;
            for value in values {
                writeln!(f, "  • {value}")?;
            }
        }

        if !result.subdomains.is_empty() {
            banner(f, "SUBDOMAINS FOUND", |s| s.blue())?;
            for hit in &result.subdomains {
                writeln!(f)?;
                writeln!(f, "{}", format!("• {}", hit.hostname).bold())?;
                writeln!(f, "  IPs: {}", hit.values.join(", "))?;
            }
        }

        banner(f, "ZONE TRANSFER", |s| s.red())?;
        writeln!(f)?;
        match (&result.zone_transfer.nameserver, result.zone_transfer.vulnerable) {
            (Some(nameserver), true) => {
                writeln!(
                    f,
                    "{} {} permitted AXFR ({} records)",
                    "VULNERABLE:".red().bold(),
                    nameserver,
                    result.zone_transfer.records.len()
                )?;
                for record in &result.zone_transfer.records {
                    writeln!(f, "  {record}")?;
                }
            }
            _ => writeln!(f, "{}", "No nameserver permitted a zone transfer".green())?,
        }

        let stats = &result.statistics;
        banner(f, "STATISTICS", |s| s.yellow())?;
        writeln!(f, "Total Queries: {}", stats.total)?;
        writeln!(f, "Successful: {}", stats.successful)?;
        writeln!(
            f,
            "Failed: {} (not found {}, timeouts {}, errors {})",
            stats.failed, stats.not_found, stats.timeouts, stats.errors
        )?;
        writeln!(f, "Scan Duration: {:.2} seconds", stats.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ResultAggregator;
    use crate::dns::{QueryOutcome, QueryStatus, RecordType, ZoneTransferFinding};
    use crate::scan::ScanStatistics;
    use std::sync::Arc;

    fn sample() -> ResultAggregator {
        let agg = ResultAggregator::new("example.com", Arc::new(ScanStatistics::new()));
        agg.merge(&QueryOutcome::new(
            "example.com",
            RecordType::MX,
            QueryStatus::Resolved(vec!["10 mail.example.com".into()]),
        ));
        agg.merge(&QueryOutcome::new(
            "www.example.com",
            RecordType::A,
            QueryStatus::Resolved(vec!["10.0.0.1".into(), "10.0.0.2".into()]),
        ));
        agg
    }

    #[test]
    fn test_report_sections() {
        let report = render_report(&sample().snapshot());
        assert!(report.contains("DNS RECON REPORT"));
        assert!(report.contains("example.com"));
        assert!(report.contains("10 mail.example.com"));
        assert!(report.contains("www.example.com"));
        assert!(report.contains("10.0.0.1, 10.0.0.2"));
        assert!(report.contains("No nameserver permitted a zone transfer"));
        assert!(report.contains("Total Queries: 0"));
    }

    #[test]
    fn test_report_shows_vulnerable_transfer() {
        let agg = sample();
        agg.record_zone_transfer(ZoneTransferFinding::positive(
            "ns1.example.com",
            vec!["internal.example.com A 10.1.1.1".into()],
        ));
        let report = render_report(&agg.snapshot());
        assert!(report.contains("ns1.example.com"));
        assert!(report.contains("internal.example.com A 10.1.1.1"));
    }

    #[test]
    fn test_banner_names_tool_and_version() {
        let banner = render_banner();
        assert!(banner.contains(&format!("dns_recon v{}", env!("CARGO_PKG_VERSION"))));
        assert!(banner.contains("Concurrent DNS reconnaissance"));
    }

    #[test]
    fn test_report_without_hits_omits_subdomain_section() {
        let agg = ResultAggregator::new("example.com", Arc::new(ScanStatistics::new()));
        let report = render_report(&agg.snapshot());
        assert!(!report.contains("SUBDOMAINS FOUND"));
        assert!(report.contains("(none)"));
    }
}
