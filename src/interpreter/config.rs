//! Run configuration
//!
//! The core state machine has no notion of a step budget; a [`RunConfig`]
//! lets the embedding harness add one and decide whether history is kept.

use super::constants::DEFAULT_SNAPSHOT_MEMORY_LIMIT;

/// Options for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Stop with `StepLimitExceeded` after this many steps
    pub step_limit: Option<u64>,
    /// Record a snapshot after every step for replay
    pub record_history: bool,
    /// Cap on the estimated memory used by recorded snapshots
    pub snapshot_memory_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            step_limit: None,
            record_history: false,
            snapshot_memory_limit: DEFAULT_SNAPSHOT_MEMORY_LIMIT,
        }
    }
}

impl RunConfig {
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn with_snapshot_memory_limit(mut self, bytes: usize) -> Self {
        self.snapshot_memory_limit = bytes;
        self
    }
}
