//! Hooks for watching a scan while it runs.

use crate::aggregate::SubdomainHit;
use crate::dns::ZoneTransferFinding;

use super::ScanPhase;

/// Receives scan events as they happen.
///
/// Callbacks run on the orchestrating task, between completions, so they
/// should return quickly. All methods default to doing nothing.
pub trait ScanObserver: Send + Sync {
    fn on_phase(&self, _phase: ScanPhase) {}

    /// A hostname was discovered for the first time.
    fn on_hit(&self, _hit: &SubdomainHit) {}

    fn on_zone_transfer(&self, _finding: &ZoneTransferFinding) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
