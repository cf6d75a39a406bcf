use crate::TtlMs;
use std::time::Duration;
use tracing::warn;

pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub stats_api_url: String,
    pub basic_ttl: TtlMs,
    pub premium_ttl: TtlMs,
    pub memo_max_entries: u64,
    pub upstream_timeout: Option<Duration>,
    pub use_placeholder_data: bool,
    pub data_dir: String,
    pub admin_username: String,
    pub admin_password: String,
    pub allowed_origins: Vec<String>,
    pub alby_api_url: String,
    pub alby_access_token: Option<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 8080;
    const DEFAULT_STATS_API_URL: &str = "http://localhost:8000";
    const DEFAULT_BASIC_TTL: TtlMs = TtlMs::from_minutes(15);
    const DEFAULT_PREMIUM_TTL: TtlMs = TtlMs::from_minutes(5);
    const DEFAULT_MEMO_MAX_ENTRIES: u64 = 1024;
    const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
    const DEFAULT_ADMIN_USERNAME: &str = "admin";
    const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_ALBY_API_URL: &str = "https://api.getalby.com";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("NODEWATCH_{key}"));
        let number = |key: &str, default: u64| {
            var(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let upstream_timeout_ms = number("UPSTREAM_TIMEOUT_MS", Self::DEFAULT_UPSTREAM_TIMEOUT_MS);

        Self {
            host: var("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: var("HTTP_PORT")
                .and_then(|v| v.trim().parse::<u16>().ok())
                .unwrap_or(Self::DEFAULT_HTTP_PORT),
            stats_api_url: var("STATS_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| Self::DEFAULT_STATS_API_URL.to_string()),
            basic_ttl: TtlMs(number("BASIC_TTL_MS", Self::DEFAULT_BASIC_TTL.0)),
            premium_ttl: TtlMs(number("PREMIUM_TTL_MS", Self::DEFAULT_PREMIUM_TTL.0)),
            memo_max_entries: number("MEMO_MAX_ENTRIES", Self::DEFAULT_MEMO_MAX_ENTRIES),
            upstream_timeout: (upstream_timeout_ms > 0)
                .then(|| Duration::from_millis(upstream_timeout_ms)),
            use_placeholder_data: var("USE_PLACEHOLDER_DATA")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            data_dir: var("DATA_DIR").unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            admin_username: var("ADMIN_USERNAME")
                .unwrap_or_else(|| Self::DEFAULT_ADMIN_USERNAME.to_string()),
            admin_password: var("ADMIN_PASSWORD").unwrap_or_else(|| {
                warn!("NODEWATCH_ADMIN_PASSWORD not set, using default password 'admin123'");
                warn!("Please change the default admin password immediately!");
                Self::DEFAULT_ADMIN_PASSWORD.to_string()
            }),
            allowed_origins: var("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            alby_api_url: var("ALBY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| Self::DEFAULT_ALBY_API_URL.to_string()),
            alby_access_token: var("ALBY_ACCESS_TOKEN").filter(|t| !t.is_empty()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}
