//! Ranked trading opportunity domain model.

use serde::{Deserialize, Serialize};

/// SortBy selects the ranking the service applies before truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Raw edge percentage.
    Edge,
    /// Annualized return.
    Annualized,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Edge => write!(f, "edge"),
            SortBy::Annualized => write!(f, "annualized"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edge" => Ok(SortBy::Edge),
            "annualized" => Ok(SortBy::Annualized),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Opportunity is a candidate trade surfaced by one strategy scan.
///
/// The service ranks the list; the client never re-sorts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Market or event identifier.
    pub id: String,
    /// Human-readable market question or event title.
    pub name: String,
    /// Strategy id that produced the opportunity.
    pub strategy: String,
    /// Absolute pricing inefficiency.
    pub edge: f64,
    /// Edge as a percentage.
    #[serde(default)]
    pub edge_pct: Option<f64>,
    /// Edge scaled to a yearly rate, when the strategy has a horizon.
    #[serde(default)]
    pub annualized_return: Option<f64>,
    /// Available liquidity in USD.
    pub liquidity: f64,
    #[serde(default)]
    pub days_until_resolution: Option<f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub num_outcomes: Option<u32>,
}

impl Opportunity {
    /// Return figure to display: annualized return, else edge percentage.
    ///
    /// `None` means neither is available and the caller shows "N/A".
    pub fn display_return(&self) -> Option<f64> {
        self.annualized_return.or(self.edge_pct)
    }
}

/// Filters for `GET /strategies/opportunities/{strategy}`.
///
/// Unset fields are omitted from the query string so the service defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityQuery {
    pub limit: Option<u32>,
    pub min_edge: Option<f64>,
    pub min_liquidity: Option<f64>,
    pub max_days: Option<u32>,
    pub sort_by: Option<SortBy>,
}

impl OpportunityQuery {
    /// Creates a query requesting at most `limit` entries.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Returns the set parameters as (name, value) pairs in a stable order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(min_edge) = self.min_edge {
            params.push(("min_edge", min_edge.to_string()));
        }
        if let Some(min_liquidity) = self.min_liquidity {
            params.push(("min_liquidity", min_liquidity.to_string()));
        }
        if let Some(max_days) = self.max_days {
            params.push(("max_days", max_days.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            params.push(("sort_by", sort_by.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opportunity(annualized: Option<f64>, edge_pct: Option<f64>) -> Opportunity {
        Opportunity {
            id: "evt-1".to_string(),
            name: "Will it rain?".to_string(),
            strategy: "fullset".to_string(),
            edge: 0.02,
            edge_pct,
            annualized_return: annualized,
            liquidity: 1500.0,
            days_until_resolution: None,
            total_cost: None,
            num_outcomes: None,
        }
    }

    #[test]
    fn test_display_return_prefers_annualized() {
        assert_eq!(opportunity(Some(42.0), Some(2.0)).display_return(), Some(42.0));
    }

    #[test]
    fn test_display_return_falls_back_to_edge_pct() {
        assert_eq!(opportunity(None, Some(2.0)).display_return(), Some(2.0));
    }

    #[test]
    fn test_display_return_none() {
        assert_eq!(opportunity(None, None).display_return(), None);
    }

    #[test]
    fn test_parse_ignores_strategy_specific_fields() {
        let json = r#"{
            "id": "0xabc",
            "name": "BTC above 100k?",
            "strategy": "endgame",
            "outcome": "Yes",
            "price": 0.97,
            "edge": 0.03,
            "edge_pct": 3.09,
            "annualized_return": 112.8,
            "liquidity": 5400.0,
            "days_until_resolution": 10.0,
            "market_type": "crypto"
        }"#;

        let opp: Opportunity = serde_json::from_str(json).unwrap();
        assert_eq!(opp.strategy, "endgame");
        assert_eq!(opp.annualized_return, Some(112.8));
        assert_eq!(opp.total_cost, None);
    }

    #[test]
    fn test_query_params_skip_unset() {
        let query = OpportunityQuery {
            limit: Some(5),
            max_days: Some(30),
            sort_by: Some(SortBy::Edge),
            ..OpportunityQuery::default()
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("limit", "5".to_string()),
                ("max_days", "30".to_string()),
                ("sort_by", "edge".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(OpportunityQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_sort_by_roundtrip_display() {
        assert_eq!("annualized".parse::<SortBy>().unwrap(), SortBy::Annualized);
        assert!("volume".parse::<SortBy>().is_err());
    }
}
