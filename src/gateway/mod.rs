//! Typed boundary to the trading service HTTP API.

mod client;
mod error;

pub use client::HttpGateway;
pub use error::{ErrorKind, GatewayError};

use async_trait::async_trait;

use crate::domain::{
    ActivityLogEntry, BotSettings, CommandReply, Opportunity, OpportunityQuery, Position,
    SettingsUpdate, StatusResponse, StrategyType,
};

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway is the request/response contract with the service.
///
/// Each method maps to one endpoint under the `/api` base path and returns
/// parsed domain objects. Every failure surfaces as a `GatewayError`.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// GET /bot/status
    async fn status(&self) -> Result<StatusResponse>;

    /// GET /bot/activity?limit=
    async fn activity(&self, limit: Option<u32>) -> Result<Vec<ActivityLogEntry>>;

    /// GET /strategies/opportunities/{strategy}
    async fn opportunities(
        &self,
        strategy: StrategyType,
        query: &OpportunityQuery,
    ) -> Result<Vec<Opportunity>>;

    /// GET /portfolio/positions
    async fn positions(&self) -> Result<Vec<Position>>;

    /// GET /settings
    async fn settings(&self) -> Result<BotSettings>;

    /// POST /settings. Returns the settings the service ended up with.
    async fn update_settings(&self, update: &SettingsUpdate) -> Result<BotSettings>;

    /// POST /bot/start with the preset id forwarded as-is.
    async fn start(&self, preset: &str) -> Result<CommandReply>;

    /// POST /bot/stop
    async fn stop(&self) -> Result<CommandReply>;
}
