//! JSON report export.
//!
//! The document has the keys `domain`, `timestamp`, `dns_records`,
//! `subdomains` (each `{subdomain, ips}`), `zone_transfer`, `statistics` and
//! `cancelled`. Passing `-` as the path writes to stdout.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::aggregate::ScanResult;

/// Serializes a result to pretty-printed JSON.
pub fn to_json_string(result: &ScanResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize scan result")
}

/// Writes a result as JSON to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub async fn write_json_report(result: &ScanResult, path: &Path) -> Result<()> {
    let mut document = to_json_string(result)?;
    document.push('\n');

    if path.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(document.as_bytes())
            .context("Failed to write report to stdout")?;
        return stdout.flush().context("Failed to flush stdout");
    }

    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!("Results saved to {}", path.display());
    Ok(())
}
