//! Console-facing application modules.
//!
//! This module provides progress logging, shutdown handling, statistics
//! printing, the console report and the live console observer.

pub mod logging;
pub mod observer;
pub mod report;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use observer::ConsoleObserver;
pub use report::{render_banner, render_report};
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_failure_statistics, print_simple_summary};
