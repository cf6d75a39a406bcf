use crate::error::StartupError;
use nodewatch::auth::{
    defaults::ensure_default_admin, AuthService, SessionStore, SledUserRepository, UserService,
};
use nodewatch::ports::{StatsUpstream, WebhookProvider};
use nodewatch::stats::{BasicStatsService, PremiumStatsService};
use nodewatch::webhook::{SledWebhookRepository, WebhookService};
use serde_json::Value;
use shared::config::Config;
use shared::{Clock, TtlMs};
use std::path::Path;
use std::sync::Arc;
use storage_engine::{Memoized, MokaEntryStore};
use tracing::info;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub basic: Arc<BasicStatsService>,
    pub premium: Arc<PremiumStatsService>,
    pub webhooks: Arc<WebhookService>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub session_store: Arc<SessionStore>,
    pub use_placeholder_data: bool,
}

impl AppState {
    /// Wire every service from configuration. Opens the embedded stores under
    /// `config.data_dir` and creates the default admin if it is missing.
    pub async fn build(
        config: &Config,
        upstream: Arc<dyn StatsUpstream>,
        provider: Arc<dyn WebhookProvider>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StartupError> {
        let data_dir = Path::new(&config.data_dir);
        std::fs::create_dir_all(data_dir)?;

        let basic_memo = memo("basic-stats", config.basic_ttl, config.memo_max_entries, &clock);
        let premium_memo = memo(
            "premium-stats",
            config.premium_ttl,
            config.memo_max_entries,
            &clock,
        );
        info!(
            basic_ttl_ms = config.basic_ttl.0,
            premium_ttl_ms = config.premium_ttl.0,
            max_entries = config.memo_max_entries,
            "Statistics memoization configured"
        );

        let user_repo = Arc::new(SledUserRepository::new(data_dir.join("users.sled"))?);
        ensure_default_admin(
            user_repo.as_ref(),
            &config.admin_username,
            &config.admin_password,
        )
        .await?;

        let webhook_repo = Arc::new(SledWebhookRepository::new(data_dir.join("webhooks.sled"))?);

        Ok(Self {
            basic: Arc::new(BasicStatsService::new(upstream.clone(), basic_memo)),
            premium: Arc::new(PremiumStatsService::new(upstream, premium_memo)),
            webhooks: Arc::new(WebhookService::new(webhook_repo, provider)),
            auth_service: Arc::new(AuthService::new(user_repo.clone())),
            user_service: Arc::new(UserService::new(user_repo)),
            session_store: Arc::new(SessionStore::with_defaults(clock)),
            use_placeholder_data: config.use_placeholder_data,
        })
    }
}

/// A memo store is swept after one TTL; freshness itself is judged by `clock`.
fn memo(name: &str, ttl: TtlMs, max_entries: u64, clock: &Arc<dyn Clock>) -> Memoized<Value> {
    let store = Arc::new(MokaEntryStore::<Value>::new(
        name,
        Some(max_entries),
        Some(ttl.as_duration()),
    ));
    Memoized::new(name, store, ttl, Arc::clone(clock))
}
