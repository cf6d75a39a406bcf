use super::fetch_query;
use super::query::StatQuery;
use crate::ports::StatsUpstream;
use serde_json::Value;
use shared::Result;
use std::sync::Arc;
use storage_engine::Memoized;
use tracing::info;

/// Network-wide statistics, open to every visitor
pub struct BasicStatsService {
    upstream: Arc<dyn StatsUpstream>,
    memo: Memoized<Value>,
}

impl BasicStatsService {
    pub fn new(upstream: Arc<dyn StatsUpstream>, memo: Memoized<Value>) -> Self {
        Self { upstream, memo }
    }

    pub async fn query(&self, query: &StatQuery) -> Result<Value> {
        fetch_query(&self.memo, &self.upstream, query).await
    }

    pub async fn network_summary(&self) -> Result<Value> {
        self.query(&StatQuery::NetworkSummary).await
    }

    pub async fn simplified_network_graph(&self) -> Result<Value> {
        self.query(&StatQuery::SimplifiedNetworkGraph).await
    }

    pub async fn top_centralities(&self) -> Result<Value> {
        self.query(&StatQuery::TopCentralities).await
    }

    pub async fn fee_market_overview(&self) -> Result<Value> {
        self.query(&StatQuery::FeeMarketOverview).await
    }

    pub async fn limited_historical_data(&self) -> Result<Value> {
        self.query(&StatQuery::LimitedHistoricalData).await
    }

    /// Check that the statistics service is up. Never fails; unreachable means `false`.
    pub async fn test_connection(&self) -> bool {
        let healthy = self.upstream.is_healthy().await;
        info!(healthy, "Statistics service connection test");
        healthy
    }
}
