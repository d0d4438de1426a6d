//! Domain models mirrored from the trading service.

mod activity;
mod command;
mod opportunity;
mod portfolio;
mod settings;
mod status;
mod strategy;

pub use activity::{ActivityKind, ActivityLogEntry};
pub use command::CommandReply;
pub use opportunity::{Opportunity, OpportunityQuery, SortBy};
pub use portfolio::{Position, PortfolioSummary};
pub use settings::{BotSettings, SettingsUpdate, StrategyToggles};
pub use status::{BotStatus, StatusResponse};
pub use strategy::{PRESETS, Preset, StrategyType};
