use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use uuid::Uuid;

/// Event type the payment provider sends when an incoming invoice is paid
pub const INVOICE_SETTLED: &str = "invoice.incoming.settled";

/// What a user asks for when registering a webhook endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointRegistration {
    pub url: String,
    pub description: String,
    pub filter_types: Vec<String>,
}

impl EndpointRegistration {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::Validation("url is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation("description is required".into()));
        }
        if self.filter_types.is_empty() || self.filter_types.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::Validation(
                "filter_types must list at least one event type".into(),
            ));
        }
        Ok(())
    }
}

/// Endpoint as created by the payment provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEndpoint {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub filter_types: Vec<String>,
    pub endpoint_secret: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A registered endpoint owned by one user, including the shared signing secret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    pub id: String,
    pub user_id: String,
    pub endpoint_id: String,
    pub endpoint_secret: String,
    pub url: String,
    pub description: String,
    pub filter_types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl WebhookEndpoint {
    pub fn from_provider(user_id: impl Into<String>, endpoint: ProviderEndpoint) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            endpoint_id: endpoint.id,
            endpoint_secret: endpoint.endpoint_secret,
            url: endpoint.url,
            description: endpoint.description,
            filter_types: endpoint.filter_types,
            created_at: Utc::now(),
        }
    }
}

/// Body of a webhook delivery. Only the fields used here are read.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct IncomingEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub payment_hash: Option<String>,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub settled_at: Option<String>,
}

/// A settled incoming payment recorded from a webhook delivery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettledPayment {
    pub payment_hash: String,
    pub amount: Option<u64>,
    pub currency: Option<String>,
    pub settled_at: Option<String>,
    pub endpoint_id: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    PaymentSettled(SettledPayment),
    Ignored { event_type: String },
}
