//! Static strategy and preset reference data.

use serde::{Deserialize, Serialize};

/// StrategyType is the closed set of trading approaches the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    /// Buy every outcome of an event when the set costs less than $1.
    Fullset,
    /// Near-certain outcomes close to resolution.
    Endgame,
    /// Markets whose outcome is already known off-chain.
    Oracle,
    /// Holding and liquidity rewards.
    Rewards,
}

impl StrategyType {
    pub const ALL: [StrategyType; 4] = [
        StrategyType::Fullset,
        StrategyType::Endgame,
        StrategyType::Oracle,
        StrategyType::Rewards,
    ];

    /// Wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyType::Fullset => "fullset",
            StrategyType::Endgame => "endgame",
            StrategyType::Oracle => "oracle",
            StrategyType::Rewards => "rewards",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyType::Fullset => "Full-Set Arbitrage",
            StrategyType::Endgame => "Endgame Sweeps",
            StrategyType::Oracle => "Oracle Timing",
            StrategyType::Rewards => "Holding Rewards",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyType::Fullset => {
                "Buy all outcomes of a multi-outcome event when their total cost is below $1"
            }
            StrategyType::Endgame => {
                "Buy near-certain outcomes shortly before resolution"
            }
            StrategyType::Oracle => {
                "Trade markets whose outcome is already decided by external price data"
            }
            StrategyType::Rewards => "Earn holding rewards on eligible long-dated positions",
        }
    }
}

impl std::fmt::Display for StrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyType::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| format!("Unknown strategy: {}", s))
    }
}

/// Preset is a named bundle resolved by the service; the client forwards the id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Presets the service is known to accept.
pub const PRESETS: [Preset; 3] = [
    Preset {
        id: "safe",
        label: "Safe",
        description: "Endgame and rewards only, high edge threshold, 10% of capital",
    },
    Preset {
        id: "balanced",
        label: "Balanced",
        description: "Full-set, endgame and rewards, 25% of capital",
    },
    Preset {
        id: "aggressive",
        label: "Aggressive",
        description: "Full-set, endgame and oracle, low edge threshold, 50% of capital",
    },
];

impl Preset {
    /// Looks up a known preset by id.
    pub fn find(id: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|preset| preset.id == id)
    }
}
