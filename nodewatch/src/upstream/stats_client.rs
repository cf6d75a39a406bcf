use crate::ports::StatsUpstream;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use shared::{Error, Result};
use std::time::Duration;
use tracing::warn;

/// reqwest client for the network-statistics service
#[derive(Clone, Debug)]
pub struct HttpStatsUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatsUpstream {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
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
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    Error::UpstreamTransport(err.to_string())
}

/// Reject non-2xx responses, then parse the body as JSON
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::UpstreamStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| Error::UpstreamPayload(e.to_string()))
}

#[async_trait]
impl StatsUpstream for HttpStatsUpstream {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        let request = self.client.post(self.url(path));
        let request = match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Statistics service health check failed: {}", e);
                false
            }
        }
    }
}
