//! Runtime counters for the poller.

/// Runtime counters for the poller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Fetch rounds whose results were applied.
    pub polls_applied: u64,
    /// Fetch rounds dropped because the poller was stopped meanwhile.
    pub polls_discarded: u64,
    /// Regular ticks skipped because a fetch was still outstanding.
    pub ticks_skipped: u64,
    pub status_failures: u64,
    pub activity_failures: u64,
}
