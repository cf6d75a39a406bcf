pub mod basic;
pub mod placeholder;
pub mod premium;
pub mod query;

pub use basic::BasicStatsService;
pub use premium::PremiumStatsService;
pub use query::{StatQuery, Timeframe};

use crate::ports::StatsUpstream;
use serde_json::Value;
use shared::Result;
use std::sync::Arc;
use storage_engine::Memoized;
use tracing::error;

/// Run `query` through `memo`, calling the upstream only on a miss
async fn fetch_query(
    memo: &Memoized<Value>,
    upstream: &Arc<dyn StatsUpstream>,
    query: &StatQuery,
) -> Result<Value> {
    let key = query.cache_key();
    let path = query.path();
    let upstream = Arc::clone(upstream);

    memo.fetch(&key, move || async move { upstream.get_json(&path).await })
        .await
        .inspect_err(|e| error!(cache = %memo.name(), key = %key, error = %e, "Statistics fetch failed"))
}
