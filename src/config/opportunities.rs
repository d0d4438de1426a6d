//! Opportunity feed configuration.

use serde::Deserialize;

use crate::domain::{OpportunityQuery, StrategyType};

/// Which strategy to scan and with what filters.
#[derive(Debug, Clone, Deserialize)]
pub struct OpportunitiesConfig {
    #[serde(default = "default_strategy")]
    pub strategy: StrategyType,
    /// Maximum entries requested from the service.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Minimum edge percentage.
    pub min_edge: Option<f64>,
    /// Minimum liquidity in USD.
    pub min_liquidity: Option<f64>,
    /// Maximum days until resolution.
    pub max_days: Option<u32>,
    /// Entries rendered to the operator.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

impl Default for OpportunitiesConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            limit: default_limit(),
            min_edge: None,
            min_liquidity: None,
            max_days: None,
            display_limit: default_display_limit(),
        }
    }
}

fn default_strategy() -> StrategyType {
    StrategyType::Fullset
}

fn default_limit() -> u32 {
    10
}

fn default_display_limit() -> usize {
    crate::feed::DISPLAY_LIMIT
}

impl OpportunitiesConfig {
    /// Query sent to the service for the configured filters.
    pub fn query(&self) -> OpportunityQuery {
        OpportunityQuery {
            limit: Some(self.limit),
            min_edge: self.min_edge,
            min_liquidity: self.min_liquidity,
            max_days: self.max_days,
            sort_by: None,
        }
    }
}
