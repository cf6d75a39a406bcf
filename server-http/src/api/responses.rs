use chrono::{DateTime, Utc};
use nodewatch::auth::{Tier, User};
use nodewatch::webhook::WebhookEndpoint;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// A user as shown to admins. The password hash stays server-side.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub tier: Tier,
    pub node_grants: Vec<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            tier: user.tier,
            node_grants: user.node_grants,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
}

/// Result of probing the statistics service
#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub status: &'static str,
    pub message: String,
}

/// A registered webhook endpoint. The signing secret is never exposed.
#[derive(Debug, Serialize)]
pub struct WebhookEndpointResponse {
    pub id: String,
    pub endpoint_id: String,
    pub url: String,
    pub description: String,
    pub filter_types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<WebhookEndpoint> for WebhookEndpointResponse {
    fn from(endpoint: WebhookEndpoint) -> Self {
        Self {
            id: endpoint.id,
            endpoint_id: endpoint.endpoint_id,
            url: endpoint.url,
            description: endpoint.description,
            filter_types: endpoint.filter_types,
            created_at: endpoint.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListWebhooksResponse {
    pub endpoints: Vec<WebhookEndpointResponse>,
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub success: bool,
}
