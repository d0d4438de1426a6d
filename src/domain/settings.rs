//! Remote bot settings and their partial-update form.

use serde::{Deserialize, Serialize};

use super::StrategyType;

/// Enabled flag for every strategy. All four keys are always present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyToggles {
    pub fullset: bool,
    pub endgame: bool,
    pub oracle: bool,
    pub rewards: bool,
}

impl StrategyToggles {
    pub fn get(&self, strategy: StrategyType) -> bool {
        match strategy {
            StrategyType::Fullset => self.fullset,
            StrategyType::Endgame => self.endgame,
            StrategyType::Oracle => self.oracle,
            StrategyType::Rewards => self.rewards,
        }
    }

    pub fn set(&mut self, strategy: StrategyType, enabled: bool) {
        let slot = match strategy {
            StrategyType::Fullset => &mut self.fullset,
            StrategyType::Endgame => &mut self.endgame,
            StrategyType::Oracle => &mut self.oracle,
            StrategyType::Rewards => &mut self.rewards,
        };
        *slot = enabled;
    }

    /// Enabled strategies in canonical order.
    pub fn enabled(&self) -> Vec<StrategyType> {
        StrategyType::ALL
            .into_iter()
            .filter(|strategy| self.get(*strategy))
            .collect()
    }
}

impl Default for StrategyToggles {
    fn default() -> Self {
        Self {
            fullset: true,
            endgame: true,
            oracle: false,
            rewards: true,
        }
    }
}

/// BotSettings is the risk configuration owned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Risk appetite in [0, 1].
    pub risk_appetite: f64,
    pub strategies_enabled: StrategyToggles,
    /// Capital ceiling in USD, never negative.
    pub max_capital: f64,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            risk_appetite: 0.5,
            strategies_enabled: StrategyToggles::default(),
            max_capital: 1000.0,
        }
    }
}

/// Body of `POST /settings`. Unset fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_appetite: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies_enabled: Option<StrategyToggles>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capital: Option<f64>,
}

impl From<&BotSettings> for SettingsUpdate {
    /// Full update carrying every field of the settings.
    fn from(settings: &BotSettings) -> Self {
        Self {
            risk_appetite: Some(settings.risk_appetite),
            strategies_enabled: Some(settings.strategies_enabled),
            max_capital: Some(settings.max_capital),
        }
    }
}
