#![deny(clippy::all)]

use crate::webhook::models::{EndpointRegistration, ProviderEndpoint};
use async_trait::async_trait;
use serde_json::Value;
use shared::Result;

// Ports are the pluggable seams to the outside services this node monitor talks to

/// Port for the network-statistics HTTP service
#[async_trait]
pub trait StatsUpstream: Send + Sync + 'static {
    /// GET `path` (relative to the service root) and parse the body as JSON
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// POST to `path`, optionally with a JSON body, and parse the response as JSON
    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value>;

    /// Whether the service answers its health check. Never fails.
    async fn is_healthy(&self) -> bool;
}

/// Port for the payment provider's webhook-endpoint API
#[async_trait]
pub trait WebhookProvider: Send + Sync + 'static {
    async fn create_endpoint(&self, registration: &EndpointRegistration) -> Result<ProviderEndpoint>;
    async fn delete_endpoint(&self, endpoint_id: &str) -> Result<()>;
}
