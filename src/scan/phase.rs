//! Scan lifecycle states.

use std::fmt;

/// Lifecycle of one scan. Transitions only move forward.
///
/// Base records and the zone-transfer check run concurrently; the phase
/// moves to `TestingZoneTransfer` once the base records are in and only the
/// transfer check remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScanPhase {
    Initialized,
    GatheringBaseRecords,
    TestingZoneTransfer,
    Enumerating,
    Finalizing,
    Complete,
}

impl ScanPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanPhase::Initialized => "initialized",
            ScanPhase::GatheringBaseRecords => "gathering base records",
            ScanPhase::TestingZoneTransfer => "testing zone transfer",
            ScanPhase::Enumerating => "enumerating subdomains",
            ScanPhase::Finalizing => "finalizing",
            ScanPhase::Complete => "complete",
        }
    }
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
