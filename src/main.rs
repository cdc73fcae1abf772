//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C handling (stops the scan and reports partial results)
//! - User-facing output formatting and JSON export
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use tokio_util::sync::CancellationToken;

use dns_recon::app::{print_simple_summary, render_banner, render_report, ConsoleObserver};
use dns_recon::config::Opt;
use dns_recon::error_handling::EXIT_CONFIGURATION_ERROR;
use dns_recon::export::write_json_report;
use dns_recon::initialization::init_logger_with;
use dns_recon::{run_scan_with_observer, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config: Config = Opt::parse().into();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format, !config.no_color)
        .context("Failed to initialize logger")?;

    println!("{}", render_banner());

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Scan interrupted by user; waiting for in-flight queries");
            cancel_on_signal.cancel();
        }
    });

    let output = config.output.clone();
    match run_scan_with_observer(config, cancel, Arc::new(ConsoleObserver)).await {
        Ok(result) => {
            println!("{}", render_report(&result));
            print_simple_summary(&result.domain, result.subdomains.len(), &result.statistics);
            if let Some(path) = output {
                if let Err(e) = write_json_report(&result, &path).await {
                    eprintln!("dns_recon error: {:#}", e);
                    process::exit(EXIT_CONFIGURATION_ERROR);
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("dns_recon error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
