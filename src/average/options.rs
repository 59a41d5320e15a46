//! Aggregation settings.

use super::policy::PolicyTable;

/// Records scanned between progress messages.
pub const DEFAULT_PROGRESS_INTERVAL: u32 = 50_000;

/// Settings for a track averaging run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOptions {
    /// Field -> reduction policy.
    pub policy: PolicyTable,
    /// Log progress every this many records (0 disables).
    pub progress_interval: u32,
    /// Compare each linked record's track id against the head's.
    pub check_track_ids: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            policy: PolicyTable::insight3(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            check_track_ids: false,
        }
    }
}
