//! Settings session error types.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Settings session error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("settings are not loaded")]
    NotLoaded,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
