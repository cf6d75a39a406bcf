use super::error::AuthError;
use super::models::User;
use super::session::{generate_session_token, Session, SessionToken, SESSION_TTL_MS};
use moka::future::Cache;
use shared::Clock;
use std::sync::Arc;
use std::time::Duration;

/// In-memory bearer sessions backed by a moka cache.
///
/// Expiry is judged against `clock`. The cache's own time-to-live only
/// sweeps abandoned sessions out of memory.
pub struct SessionStore {
    sessions: Cache<SessionToken, Session>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(max_sessions: Option<u64>, ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        let mut builder = Cache::builder().time_to_live(Duration::from_millis(ttl_ms.max(1)));

        if let Some(capacity) = max_sessions {
            builder = builder.max_capacity(capacity);
        }

        Self {
            sessions: builder.build(),
            ttl_ms,
            clock,
        }
    }

    /// Unbounded store with one-hour sessions
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(None, SESSION_TTL_MS, clock)
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub async fn create_session(&self, user: User, client_ip: Option<String>) -> Session {
        let token = generate_session_token();
        let session = Session::new(
            token.clone(),
            user,
            self.clock.now_ms(),
            self.ttl_ms,
            client_ip,
        );

        self.sessions.insert(token, session.clone()).await;
        session
    }

    /// Resolve a token to its user
    pub async fn validate_session(&self, token: &str) -> Result<User, AuthError> {
        let session = self
            .sessions
            .get(token)
            .await
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired(self.clock.now_ms()) {
            self.sessions.invalidate(token).await;
            return Err(AuthError::InvalidSession);
        }

        Ok(session.user)
    }

    /// Returns whether the token was live
    pub async fn invalidate_session(&self, token: &str) -> bool {
        self.sessions.remove(token).await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Tier;
    use shared::{ManualClock, SystemClock};

    fn user(name: &str) -> User {
        User::new(name.to_string(), "hash".to_string(), Tier::Basic)
    }

    fn store() -> SessionStore {
        SessionStore::with_defaults(Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn test_create_and_validate_session() {
        let store = store();

        let session = store.create_session(user("alice"), None).await;
        let resolved = store.validate_session(&session.token).await.unwrap();

        assert_eq!(resolved.username, "alice");
        assert_eq!(store.ttl_ms(), SESSION_TTL_MS);
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let store = store();

        let result = store.validate_session("deadbeef").await;
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }

    #[tokio::test]
    async fn test_invalidate_session() {
        let store = store();
        let session = store.create_session(user("alice"), None).await;

        assert!(store.invalidate_session(&session.token).await);
        assert!(!store.invalidate_session(&session.token).await);
        assert!(store.validate_session(&session.token).await.is_err());
    }

    #[tokio::test]
    async fn test_session_expires_after_one_hour() {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let store = SessionStore::with_defaults(clock.clone());
        let session = store.create_session(user("alice"), None).await;

        clock.advance(SESSION_TTL_MS - 1);
        assert!(store.validate_session(&session.token).await.is_ok());

        clock.advance(1);
        let result = store.validate_session(&session.token).await;
        assert!(matches!(result, Err(AuthError::InvalidSession)));

        // an expired session is dropped, not just refused
        assert!(!store.invalidate_session(&session.token).await);
    }
}
