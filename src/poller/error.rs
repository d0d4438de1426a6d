//! Poller error types.

/// Poller error type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PollerError {
    #[error("poller is already running")]
    AlreadyRunning,
    #[error("poll interval must be positive")]
    InvalidInterval,
}
