use nodewatch::auth::Tier;
use nodewatch::webhook::EndpointRegistration;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub tier: Tier,
}

#[derive(Debug, Deserialize)]
pub struct SetTierRequest {
    pub tier: Tier,
}

/// One-time premium access to a single node
#[derive(Debug, Deserialize)]
pub struct GrantNodeRequest {
    pub node_id: String,
}

/// Body of `POST /api/webhooks/alby`. Missing fields are caught by validation.
#[derive(Debug, Deserialize)]
pub struct RegisterWebhookRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub filter_types: Vec<String>,
}

impl From<RegisterWebhookRequest> for EndpointRegistration {
    fn from(req: RegisterWebhookRequest) -> Self {
        Self {
            url: req.url,
            description: req.description,
            filter_types: req.filter_types,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GrowthPredictionParams {
    pub timeframe: Option<String>,
}

/// Alert configuration is forwarded to the statistics service as-is
pub type AlertRequest = Value;
