use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription level of a dashboard user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Basic,
    Premium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub tier: Tier,
    /// Nodes this user bought one-time premium access to
    #[serde(default)]
    pub node_grants: Vec<String>,
    /// May manage other users
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, tier: Tier) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            tier,
            node_grants: Vec::new(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.tier == Tier::Premium
    }

    pub fn has_node_grant(&self, node_id: &str) -> bool {
        self.node_grants.iter().any(|n| n == node_id)
    }
}
