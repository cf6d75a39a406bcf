use super::models::User;
use chrono::DateTime;

/// Session token type - a secure random string
pub type SessionToken = String;

/// Sessions live for one hour
pub const SESSION_TTL_MS: u64 = 60 * 60 * 1000;

/// Format a timestamp (ms since epoch) as ISO 8601 UTC string
pub fn format_utc_time(timestamp_ms: u64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .unwrap_or_default()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user: User,
    pub created_at: u64,
    pub expires_at: u64,
    pub client_ip: Option<String>,
}

impl Session {
    pub fn new(
        token: SessionToken,
        user: User,
        now_ms: u64,
        ttl_ms: u64,
        client_ip: Option<String>,
    ) -> Self {
        Self {
            token,
            user,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
            client_ip,
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    pub fn expires_at_utc(&self) -> String {
        format_utc_time(self.expires_at)
    }
}

/// 32 random bytes, hex encoded
pub fn generate_session_token() -> SessionToken {
    use rand::Rng;

    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}
