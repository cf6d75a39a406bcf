use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Window for node growth predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::SevenDays => "7d",
            Timeframe::ThirtyDays => "30d",
            Timeframe::NinetyDays => "90d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "7d" => Ok(Timeframe::SevenDays),
            "30d" => Ok(Timeframe::ThirtyDays),
            "90d" => Ok(Timeframe::NinetyDays),
            other => Err(Error::Validation(format!(
                "unknown timeframe '{other}', expected 7d, 30d or 90d"
            ))),
        }
    }
}

/// Node ids are interpolated into upstream paths, so only path-safe characters pass
pub fn validate_node_id(node_id: &str) -> Result<()> {
    if node_id.is_empty() || node_id.len() > 130 {
        return Err(Error::Validation("node id must be 1-130 characters".into()));
    }
    if !node_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::Validation(format!("invalid node id '{node_id}'")));
    }
    Ok(())
}

/// Every cached statistics query, with its upstream path and memo key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatQuery {
    NetworkSummary,
    SimplifiedNetworkGraph,
    TopCentralities,
    FeeMarketOverview,
    LimitedHistoricalData,
    NodeStats(String),
    NodeCentrality(String),
    NodeLiquidity(String),
    FeeRecommendations(String),
    GrowthPrediction(String, Timeframe),
    NodeHistory(String),
}

impl StatQuery {
    pub fn cache_key(&self) -> String {
        match self {
            StatQuery::NetworkSummary => "networkSummary".to_string(),
            StatQuery::SimplifiedNetworkGraph => "simplifiedNetworkGraph".to_string(),
            StatQuery::TopCentralities => "topCentralities".to_string(),
            StatQuery::FeeMarketOverview => "feeMarketOverview".to_string(),
            StatQuery::LimitedHistoricalData => "limitedHistoricalData".to_string(),
            StatQuery::NodeStats(id) => format!("nodeStats-{id}"),
            StatQuery::NodeCentrality(id) => format!("nodeCentrality-{id}"),
            StatQuery::NodeLiquidity(id) => format!("nodeLiquidity-{id}"),
            StatQuery::FeeRecommendations(id) => format!("feeRecommendations-{id}"),
            StatQuery::GrowthPrediction(id, timeframe) => {
                format!("growthPrediction-{id}-{timeframe}")
            }
            StatQuery::NodeHistory(id) => format!("nodeHistory-{id}"),
        }
    }

    pub fn path(&self) -> String {
        match self {
            StatQuery::NetworkSummary => "/network-summary".to_string(),
            StatQuery::SimplifiedNetworkGraph => {
                "/network-graph?simplified=true&limit=500".to_string()
            }
            StatQuery::TopCentralities => "/centralities?limit=20".to_string(),
            StatQuery::FeeMarketOverview => "/fee-market/overview".to_string(),
            StatQuery::LimitedHistoricalData => {
                "/historical?resolution=daily&limit=30".to_string()
            }
            StatQuery::NodeStats(id) => format!("/node/{id}/stats"),
            StatQuery::NodeCentrality(id) => format!("/node/{id}/centrality"),
            StatQuery::NodeLiquidity(id) => format!("/node/{id}/liquidity"),
            StatQuery::FeeRecommendations(id) => format!("/node/{id}/fee-recommendations"),
            StatQuery::GrowthPrediction(id, timeframe) => {
                format!("/node/{id}/growth-prediction?timeframe={timeframe}")
            }
            StatQuery::NodeHistory(id) => format!("/node/{id}/history"),
        }
    }

    /// The node a premium query is scoped to. `None` for network-wide queries.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            StatQuery::NodeStats(id)
            | StatQuery::NodeCentrality(id)
            | StatQuery::NodeLiquidity(id)
            | StatQuery::FeeRecommendations(id)
            | StatQuery::GrowthPrediction(id, _)
            | StatQuery::NodeHistory(id) => Some(id),
            _ => None,
        }
    }
}
