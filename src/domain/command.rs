//! Replies to start/stop commands.

use serde::{Deserialize, Serialize};

use super::BotStatus;

/// Body returned by `POST /bot/start` and `POST /bot/stop`.
///
/// Only `message` is guaranteed; the reported status is informational and
/// is not applied to any local state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandReply {
    pub message: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status: Option<BotStatus>,
    #[serde(default)]
    pub preset: Option<String>,
}
