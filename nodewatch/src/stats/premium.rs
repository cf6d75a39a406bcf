use super::fetch_query;
use super::query::{validate_node_id, StatQuery, Timeframe};
use crate::access::{require_node_access, require_subscription};
use crate::auth::User;
use crate::ports::StatsUpstream;
use serde_json::Value;
use shared::{Error, Result};
use std::sync::Arc;
use storage_engine::Memoized;
use tracing::info;

/// Per-node statistics for subscribers and one-time buyers.
///
/// Every query checks access before touching the memo, so a denied caller
/// never warms the cache for someone else.
pub struct PremiumStatsService {
    upstream: Arc<dyn StatsUpstream>,
    memo: Memoized<Value>,
}

impl PremiumStatsService {
    pub fn new(upstream: Arc<dyn StatsUpstream>, memo: Memoized<Value>) -> Self {
        Self { upstream, memo }
    }

    async fn node_query(&self, user: &User, query: StatQuery) -> Result<Value> {
        if let Some(node_id) = query.node_id() {
            validate_node_id(node_id)?;
            require_node_access(user, node_id)?;
        }
        fetch_query(&self.memo, &self.upstream, &query).await
    }

    pub async fn node_stats(&self, user: &User, node_id: &str) -> Result<Value> {
        self.node_query(user, StatQuery::NodeStats(node_id.to_string()))
            .await
    }

    pub async fn node_centrality(&self, user: &User, node_id: &str) -> Result<Value> {
        self.node_query(user, StatQuery::NodeCentrality(node_id.to_string()))
            .await
    }

    pub async fn node_liquidity(&self, user: &User, node_id: &str) -> Result<Value> {
        self.node_query(user, StatQuery::NodeLiquidity(node_id.to_string()))
            .await
    }

    pub async fn fee_recommendations(&self, user: &User, node_id: &str) -> Result<Value> {
        self.node_query(user, StatQuery::FeeRecommendations(node_id.to_string()))
            .await
    }

    pub async fn growth_prediction(
        &self,
        user: &User,
        node_id: &str,
        timeframe: Timeframe,
    ) -> Result<Value> {
        self.node_query(
            user,
            StatQuery::GrowthPrediction(node_id.to_string(), timeframe),
        )
        .await
    }

    pub async fn node_history(&self, user: &User, node_id: &str) -> Result<Value> {
        self.node_query(user, StatQuery::NodeHistory(node_id.to_string()))
            .await
    }

    /// Ask the statistics service to optimize a node. Not memoized.
    pub async fn optimize_node(&self, user: &User, node_id: &str) -> Result<Value> {
        validate_node_id(node_id)?;
        require_node_access(user, node_id)?;

        let result = self
            .upstream
            .post_json(&format!("/node/{node_id}/optimize"), None)
            .await?;

        info!(username = %user.username, node_id = %node_id, "Node optimization requested");
        Ok(result)
    }

    /// Forward an alert configuration. Subscribers only; not memoized.
    pub async fn configure_alert(&self, user: &User, alert: &Value) -> Result<Value> {
        require_subscription(user)?;

        if !alert.is_object() {
            return Err(Error::Validation(
                "alert configuration must be a JSON object".into(),
            ));
        }

        let result = self.upstream.post_json("/configure-alert", Some(alert)).await?;

        info!(username = %user.username, "Alert configured");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Tier;
    use crate::stats::testing::{memo, StubUpstream};
    use serde_json::json;
    use shared::{ManualClock, TtlMs};

    const PREMIUM_TTL: TtlMs = TtlMs::from_minutes(5);

    fn service() -> (PremiumStatsService, Arc<StubUpstream>, Arc<ManualClock>) {
        let upstream = Arc::new(StubUpstream::default());
        let clock = Arc::new(ManualClock::new(0));
        let service =
            PremiumStatsService::new(upstream.clone(), memo(PREMIUM_TTL, clock.clone()));
        (service, upstream, clock)
    }

    fn subscriber() -> User {
        User::new("sub".to_string(), "h".to_string(), Tier::Premium)
    }

    fn buyer(node_id: &str) -> User {
        let mut user = User::new("buyer".to_string(), "h".to_string(), Tier::Basic);
        user.node_grants.push(node_id.to_string());
        user
    }

    #[tokio::test]
    async fn test_subscriber_reads_any_node() {
        let (service, upstream, _) = service();
        let user = subscriber();

        let stats = service.node_stats(&user, "02abc").await.unwrap();
        assert_eq!(stats["path"], "/node/02abc/stats");

        let liquidity = service.node_liquidity(&user, "03def").await.unwrap();
        assert_eq!(liquidity["path"], "/node/03def/liquidity");

        let centrality = service.node_centrality(&user, "03def").await.unwrap();
        assert_eq!(centrality["path"], "/node/03def/centrality");

        let fees = service.fee_recommendations(&user, "03def").await.unwrap();
        assert_eq!(fees["path"], "/node/03def/fee-recommendations");

        let history = service.node_history(&user, "03def").await.unwrap();
        assert_eq!(history["path"], "/node/03def/history");

        assert_eq!(upstream.total_calls(), 5);
    }

    #[tokio::test]
    async fn test_denied_caller_never_reaches_upstream() {
        let (service, upstream, _) = service();
        let user = buyer("02abc");

        assert!(service.node_stats(&user, "02abc").await.is_ok());

        let err = service.node_stats(&user, "03def").await.unwrap_err();
        assert!(matches!(err, Error::AccessDenied(_)));
        let err = service.optimize_node(&user, "03def").await.unwrap_err();
        assert!(matches!(err, Error::AccessDenied(_)));

        assert_eq!(upstream.total_calls(), 1);
        assert!(upstream.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_node_id_rejected() {
        let (service, upstream, _) = service();

        let err = service
            .node_stats(&subscriber(), "../../admin")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(upstream.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_premium_ttl_is_five_minutes() {
        let (service, upstream, clock) = service();
        let user = subscriber();

        service.node_stats(&user, "02abc").await.unwrap();

        clock.set(PREMIUM_TTL.0 - 1);
        service.node_stats(&user, "02abc").await.unwrap();
        assert_eq!(upstream.calls_to("/node/02abc/stats"), 1);

        clock.set(PREMIUM_TTL.0);
        service.node_stats(&user, "02abc").await.unwrap();
        assert_eq!(upstream.calls_to("/node/02abc/stats"), 2);
    }

    #[tokio::test]
    async fn test_growth_prediction_cached_per_timeframe() {
        let (service, upstream, _) = service();
        let user = subscriber();

        service
            .growth_prediction(&user, "02abc", Timeframe::SevenDays)
            .await
            .unwrap();
        service
            .growth_prediction(&user, "02abc", Timeframe::SevenDays)
            .await
            .unwrap();
        service
            .growth_prediction(&user, "02abc", Timeframe::NinetyDays)
            .await
            .unwrap();

        assert_eq!(
            upstream.calls_to("/node/02abc/growth-prediction?timeframe=7d"),
            1
        );
        assert_eq!(
            upstream.calls_to("/node/02abc/growth-prediction?timeframe=90d"),
            1
        );
    }

    #[tokio::test]
    async fn test_optimize_is_never_memoized() {
        let (service, upstream, _) = service();
        let user = buyer("02abc");

        service.optimize_node(&user, "02abc").await.unwrap();
        service.optimize_node(&user, "02abc").await.unwrap();

        let posts = upstream.posts.lock().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], ("/node/02abc/optimize".to_string(), None));
    }

    #[tokio::test]
    async fn test_configure_alert_requires_subscription() {
        let (service, upstream, _) = service();
        let alert = json!({ "node_id": "02abc", "threshold": 0.2 });

        let err = service
            .configure_alert(&buyer("02abc"), &alert)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccessDenied(_)));

        let result = service.configure_alert(&subscriber(), &alert).await.unwrap();
        assert_eq!(result["accepted"], true);

        let posts = upstream.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "/configure-alert");
        assert_eq!(posts[0].1.as_ref(), Some(&alert));
    }

    #[tokio::test]
    async fn test_configure_alert_rejects_non_object() {
        let (service, _, _) = service();

        let err = service
            .configure_alert(&subscriber(), &json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let (service, upstream, _) = service();
        upstream.fail(true);

        let err = service.node_history(&subscriber(), "02abc").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamStatus { .. }));

        let err = service
            .optimize_node(&subscriber(), "02abc")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamTransport(_)));
    }
}
