use super::error::AuthError;
use super::models::{Tier, User};
use super::password::hash_password;
use super::repository::UserRepository;
use crate::stats::query::validate_node_id;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn create_user(
        &self,
        username: String,
        password: String,
        tier: Tier,
    ) -> Result<User, AuthError> {
        if self.user_repo.username_exists(&username).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(&password)?;
        let user = self.user_repo.create(User::new(username, password_hash, tier)).await?;

        info!(username = %user.username, tier = ?user.tier, "User created");
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<User, AuthError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.user_repo.list_all().await
    }

    pub async fn set_tier(&self, user_id: &str, tier: Tier) -> Result<User, AuthError> {
        let mut user = self.get_user_by_id(user_id).await?;

        user.tier = tier;
        user.updated_at = Utc::now();

        self.user_repo.update(user).await
    }

    /// Record one-time premium access to a single node. Granting twice is a no-op.
    pub async fn grant_node_access(&self, user_id: &str, node_id: &str) -> Result<User, AuthError> {
        validate_node_id(node_id).map_err(|_| AuthError::InvalidNodeId(node_id.to_string()))?;

        let mut user = self.get_user_by_id(user_id).await?;
        if user.has_node_grant(node_id) {
            return Ok(user);
        }

        user.node_grants.push(node_id.to_string());
        user.updated_at = Utc::now();

        info!(username = %user.username, node_id = %node_id, "Node access granted");
        self.user_repo.update(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sled_repository::SledUserRepository;
    use tempfile::TempDir;

    fn service(temp_dir: &TempDir) -> UserService {
        let repo = Arc::new(SledUserRepository::new(temp_dir.path().join("users.sled")).unwrap());
        UserService::new(repo)
    }

    #[tokio::test]
    async fn test_create_user() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let user = service
            .create_user("alice".to_string(), "alicepass1".to_string(), Tier::Basic)
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "alicepass1");
        assert_eq!(service.get_user_by_id(&user.id).await.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_create_duplicate_user() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        service
            .create_user("alice".to_string(), "alicepass1".to_string(), Tier::Basic)
            .await
            .unwrap();
        let result = service
            .create_user("alice".to_string(), "alicepass2".to_string(), Tier::Basic)
            .await;

        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_user_with_weak_password() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        let result = service
            .create_user("alice".to_string(), "weak".to_string(), Tier::Basic)
            .await;
        assert!(matches!(result, Err(AuthError::WeakPassword)));
    }

    #[tokio::test]
    async fn test_set_tier() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let user = service
            .create_user("alice".to_string(), "alicepass1".to_string(), Tier::Basic)
            .await
            .unwrap();

        let upgraded = service.set_tier(&user.id, Tier::Premium).await.unwrap();
        assert!(upgraded.is_premium());
        assert!(service.get_user_by_id(&user.id).await.unwrap().is_premium());
    }

    #[tokio::test]
    async fn test_grant_node_access_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let user = service
            .create_user("alice".to_string(), "alicepass1".to_string(), Tier::Basic)
            .await
            .unwrap();

        service.grant_node_access(&user.id, "02abc").await.unwrap();
        let user = service.grant_node_access(&user.id, "02abc").await.unwrap();

        assert_eq!(user.node_grants, vec!["02abc".to_string()]);
    }

    #[tokio::test]
    async fn test_grant_rejects_bad_node_id() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let user = service
            .create_user("alice".to_string(), "alicepass1".to_string(), Tier::Basic)
            .await
            .unwrap();

        let result = service.grant_node_access(&user.id, "../etc").await;
        assert!(matches!(result, Err(AuthError::InvalidNodeId(_))));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);

        assert!(matches!(
            service.get_user_by_id("ghost").await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            service.set_tier("missing-id", Tier::Premium).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
