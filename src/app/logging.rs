//! Progress logging utilities.

use log::info;

use crate::scan::ScanStatistics;

/// Logs progress information about candidate resolution.
///
/// # Arguments
///
/// * `start_time` - The start time of the scan
/// * `statistics` - Live scan counters
/// * `in_flight` - Queries currently holding a gate permit
pub fn log_progress(
    start_time: std::time::Instant,
    statistics: &ScanStatistics,
    in_flight: usize,
) {
    let snapshot = statistics.snapshot();
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = snapshot.successful + snapshot.failed;
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Resolved {} of {} queries in {:.2} seconds (~{:.2} queries/sec, {} found, {} in flight)",
        completed, snapshot.total, elapsed_secs, rate, snapshot.successful, in_flight
    );
}
