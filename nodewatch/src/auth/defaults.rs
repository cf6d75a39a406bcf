use super::error::AuthError;
use super::models::{Tier, User};
use super::password::hash_password;
use super::repository::UserRepository;
use tracing::info;

/// Build the default admin account. Admins have a premium subscription.
pub fn create_default_admin(username: String, password: String) -> Result<User, AuthError> {
    let password_hash = hash_password(&password)?;
    let mut admin = User::new(username, password_hash, Tier::Premium);
    admin.is_admin = true;
    Ok(admin)
}

/// Create the default admin unless a user with that name already exists
pub async fn ensure_default_admin(
    user_repo: &dyn UserRepository,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    if let Some(existing) = user_repo.find_by_username(username).await? {
        return Ok(existing);
    }

    let admin = create_default_admin(username.to_string(), password.to_string())?;
    let admin = user_repo.create(admin).await?;

    info!(username = %admin.username, "Created default admin user");
    Ok(admin)
}
