use super::stats_client::transport_error;
use crate::ports::WebhookProvider;
use crate::webhook::models::{EndpointRegistration, ProviderEndpoint};
use async_trait::async_trait;
use shared::{Error, Result};
use std::time::Duration;

/// Webhook-endpoint API of the Alby payment service
#[derive(Clone, Debug)]
pub struct AlbyWebhookProvider {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl AlbyWebhookProvider {
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or_else(|| Error::Internal("Alby access token is not configured".into()))
    }
}

#[async_trait]
impl WebhookProvider for AlbyWebhookProvider {
    async fn create_endpoint(&self, registration: &EndpointRegistration) -> Result<ProviderEndpoint> {
        let response = self
            .client
            .post(format!("{}/webhook_endpoints", self.base_url))
            .bearer_auth(self.token()?)
            .json(registration)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        response
            .json::<ProviderEndpoint>()
            .await
            .map_err(|e| Error::UpstreamPayload(e.to_string()))
    }

    async fn delete_endpoint(&self, endpoint_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/webhook_endpoints/{}", self.base_url, endpoint_id))
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        // already gone at the provider is fine
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(Error::UpstreamStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            })
        }
    }
}
