//! Start/stop commands for the remote bot.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{BotStatus, CommandReply};
use crate::gateway::{Gateway, Result};
use crate::poller::Refresh;

/// Which command a toggle resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
        }
    }
}

impl Command {
    /// Stop when the bot is doing work, otherwise start.
    pub fn for_status(current: BotStatus) -> Self {
        if current.is_active() {
            Command::Stop
        } else {
            Command::Start
        }
    }
}

/// BotControlCoordinator issues start/stop and then asks for a fresh poll.
///
/// It never changes any local status itself: what the operator sees next
/// always comes from the poller.
pub struct BotControlCoordinator {
    gateway: Arc<dyn Gateway>,
    refresher: Arc<dyn Refresh>,
}

impl BotControlCoordinator {
    pub fn new(gateway: Arc<dyn Gateway>, refresher: Arc<dyn Refresh>) -> Self {
        Self { gateway, refresher }
    }

    /// Stops a running or scanning bot, starts a stopped one with `preset`.
    pub async fn toggle(&self, current: BotStatus, preset: &str) -> Result<CommandReply> {
        match Command::for_status(current) {
            Command::Stop => self.stop().await,
            Command::Start => self.start(preset).await,
        }
    }

    /// Sends `start(preset)`. The preset id is forwarded untouched.
    pub async fn start(&self, preset: &str) -> Result<CommandReply> {
        let result = self.gateway.start(preset).await;
        self.finish(Command::Start, result)
    }

    pub async fn stop(&self) -> Result<CommandReply> {
        let result = self.gateway.stop().await;
        self.finish(Command::Stop, result)
    }

    fn finish(&self, command: Command, result: Result<CommandReply>) -> Result<CommandReply> {
        match &result {
            Ok(reply) => info!(command = %command, message = %reply.message, "Command accepted"),
            Err(e) => warn!(command = %command, error = %e, kind = %e.kind(), "Command failed"),
        }
        self.refresher.request_refresh();
        result
    }
}
