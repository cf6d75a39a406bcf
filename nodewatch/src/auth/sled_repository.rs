use super::error::AuthError;
use super::models::User;
use super::repository::UserRepository;
use async_trait::async_trait;
use sled::Db;
use std::path::Path;

const USERS_TREE: &str = "users";
const USERS_BY_USERNAME_TREE: &str = "users_by_username";

#[derive(Clone)]
pub struct SledUserRepository {
    db: Db,
}

impl SledUserRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Share an already opened database
    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn users_tree(&self) -> Result<sled::Tree, AuthError> {
        Ok(self.db.open_tree(USERS_TREE)?)
    }

    fn users_by_username_tree(&self) -> Result<sled::Tree, AuthError> {
        Ok(self.db.open_tree(USERS_BY_USERNAME_TREE)?)
    }
}

#[async_trait]
impl UserRepository for SledUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        if self.username_exists(&user.username).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let users_tree = self.users_tree()?;
        let username_tree = self.users_by_username_tree()?;

        let user_json = serde_json::to_vec(&user)?;

        users_tree.insert(user.id.as_bytes(), user_json)?;
        username_tree.insert(user.username.as_bytes(), user.id.as_bytes())?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let username_tree = self.users_by_username_tree()?;
        let users_tree = self.users_tree()?;

        if let Some(user_id) = username_tree.get(username.as_bytes())? {
            if let Some(user_data) = users_tree.get(&user_id)? {
                let user: User = serde_json::from_slice(&user_data)?;
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AuthError> {
        let users_tree = self.users_tree()?;

        match users_tree.get(id.as_bytes())? {
            Some(user_data) => Ok(Some(serde_json::from_slice(&user_data)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, AuthError> {
        let users_tree = self.users_tree()?;
        let mut users = Vec::new();

        for item in users_tree.iter() {
            let (_, user_data) = item?;
            users.push(serde_json::from_slice(&user_data)?);
        }

        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let users_tree = self.users_tree()?;
        let username_tree = self.users_by_username_tree()?;

        if !users_tree.contains_key(user.id.as_bytes())? {
            return Err(AuthError::UserNotFound);
        }

        let user_json = serde_json::to_vec(&user)?;

        users_tree.insert(user.id.as_bytes(), user_json)?;
        username_tree.insert(user.username.as_bytes(), user.id.as_bytes())?;

        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let username_tree = self.users_by_username_tree()?;
        Ok(username_tree.contains_key(username.as_bytes())?)
    }
}
