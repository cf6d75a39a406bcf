use super::error::AuthError;
use super::models::User;
use super::password::verify_password;
use super::repository::UserRepository;
use std::sync::Arc;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Authenticate a user by username and password
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Tier;
    use crate::auth::password::hash_password;
    use crate::auth::sled_repository::SledUserRepository;
    use tempfile::TempDir;

    async fn service_with_user(temp_dir: &TempDir) -> AuthService {
        let user_repo = Arc::new(
            SledUserRepository::new(temp_dir.path().join("users.sled")).unwrap(),
        ) as Arc<dyn UserRepository>;

        let password_hash = hash_password("testpass123").unwrap();
        user_repo
            .create(User::new("testuser".to_string(), password_hash, Tier::Basic))
            .await
            .unwrap();

        AuthService::new(user_repo)
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let temp_dir = TempDir::new().unwrap();
        let auth_service = service_with_user(&temp_dir).await;

        let user = auth_service.authenticate("testuser", "testpass123").await.unwrap();
        assert_eq!(user.username, "testuser");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_password() {
        let temp_dir = TempDir::new().unwrap();
        let auth_service = service_with_user(&temp_dir).await;

        let result = auth_service.authenticate("testuser", "wrongpass1").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let temp_dir = TempDir::new().unwrap();
        let auth_service = service_with_user(&temp_dir).await;

        let result = auth_service.authenticate("nobody", "testpass123").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
