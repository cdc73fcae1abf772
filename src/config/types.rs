//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_THREADS;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through the CLI; it is turned
/// into a validated [`ScanTarget`](crate::config::ScanTarget) when a scan
/// starts.
///
/// # Examples
///
/// ```no_run
/// use dns_recon::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     threads: 20,
///     quick: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Target domain
    pub domain: String,

    /// Maximum concurrent in-flight queries (1-100)
    pub threads: usize,

    /// Custom wordlist file; the built-in list is used when absent
    pub wordlist: Option<PathBuf>,

    /// JSON report output path
    pub output: Option<PathBuf>,

    /// Upstream resolvers to query instead of the system configuration
    pub nameservers: Vec<IpAddr>,

    /// Quick mode: reduced built-in wordlist and shorter timeout
    pub quick: bool,

    /// Explicit per-query timeout in seconds (overrides the mode preset)
    pub timeout_secs: Option<u64>,

    /// Disable colored terminal output
    pub no_color: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            threads: DEFAULT_THREADS,
            wordlist: None,
            output: None,
            nameservers: Vec::new(),
            quick: false,
            timeout_secs: None,
            no_color: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// dns_recon -d example.com
///
/// # Custom wordlist and more threads
/// dns_recon -d example.com -w custom_wordlist.txt -t 20
///
/// # Quick scan against a specific resolver, saving JSON
/// dns_recon -d example.com --quick --nameserver 1.1.1.1 -o results.json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "dns_recon",
    about = "DNS reconnaissance: subdomain brute force, record gathering and zone-transfer testing."
)]
pub struct Opt {
    /// Target domain
    #[arg(short, long)]
    pub domain: String,

    /// Custom wordlist file (one label per line)
    #[arg(short, long, value_parser)]
    pub wordlist: Option<PathBuf>,

    /// Number of concurrent queries (1-100)
    #[arg(short, long, default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Output file (JSON format)
    #[arg(short, long, value_parser)]
    pub output: Option<PathBuf>,

    /// Resolver to query instead of the system configuration (repeatable)
    #[arg(long = "nameserver")]
    pub nameservers: Vec<IpAddr>,

    /// Quick mode: smaller built-in wordlist and shorter timeouts
    #[arg(long)]
    pub quick: bool,

    /// Per-query timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domain: opt.domain,
            threads: opt.threads,
            wordlist: opt.wordlist,
            output: opt.output,
            nameservers: opt.nameservers,
            quick: opt.quick,
            timeout_secs: opt.timeout_secs,
            no_color: opt.no_color,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}
