use super::models::{SettledPayment, WebhookEndpoint};
use async_trait::async_trait;
use shared::{Error, Result};
use sled::Db;
use std::path::Path;

const ENDPOINTS_TREE: &str = "webhook_endpoints";
const PAYMENTS_TREE: &str = "settled_payments";

#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// Store an endpoint, keyed by its provider endpoint id
    async fn save_endpoint(&self, endpoint: WebhookEndpoint) -> Result<WebhookEndpoint>;

    /// Find an endpoint by provider endpoint id
    async fn find_endpoint(&self, endpoint_id: &str) -> Result<Option<WebhookEndpoint>>;

    /// List all endpoints owned by a user
    async fn list_user_endpoints(&self, user_id: &str) -> Result<Vec<WebhookEndpoint>>;

    /// Delete an endpoint. Returns whether it existed.
    async fn delete_endpoint(&self, endpoint_id: &str) -> Result<bool>;

    /// Record (or overwrite) a settled payment keyed by payment hash
    async fn record_payment(&self, payment: SettledPayment) -> Result<()>;

    async fn find_payment(&self, payment_hash: &str) -> Result<Option<SettledPayment>>;
}

fn storage_error(err: sled::Error) -> Error {
    Error::Storage(err.to_string())
}

fn decode_error(err: serde_json::Error) -> Error {
    Error::Storage(format!("corrupt record: {err}"))
}

#[derive(Clone)]
pub struct SledWebhookRepository {
    db: Db,
}

impl SledWebhookRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).map_err(storage_error)?;
        Ok(Self { db })
    }

    fn endpoints_tree(&self) -> Result<sled::Tree> {
        self.db.open_tree(ENDPOINTS_TREE).map_err(storage_error)
    }

    fn payments_tree(&self) -> Result<sled::Tree> {
        self.db.open_tree(PAYMENTS_TREE).map_err(storage_error)
    }
}

#[async_trait]
impl WebhookRepository for SledWebhookRepository {
    async fn save_endpoint(&self, endpoint: WebhookEndpoint) -> Result<WebhookEndpoint> {
        let tree = self.endpoints_tree()?;
        let json = serde_json::to_vec(&endpoint).map_err(decode_error)?;

        tree.insert(endpoint.endpoint_id.as_bytes(), json)
            .map_err(storage_error)?;

        Ok(endpoint)
    }

    async fn find_endpoint(&self, endpoint_id: &str) -> Result<Option<WebhookEndpoint>> {
        let tree = self.endpoints_tree()?;

        match tree.get(endpoint_id.as_bytes()).map_err(storage_error)? {
            Some(data) => Ok(Some(serde_json::from_slice(&data).map_err(decode_error)?)),
            None => Ok(None),
        }
    }

    async fn list_user_endpoints(&self, user_id: &str) -> Result<Vec<WebhookEndpoint>> {
        let tree = self.endpoints_tree()?;
        let mut endpoints = Vec::new();

        for item in tree.iter() {
            let (_, data) = item.map_err(storage_error)?;
            let endpoint: WebhookEndpoint = serde_json::from_slice(&data).map_err(decode_error)?;
            if endpoint.user_id == user_id {
                endpoints.push(endpoint);
            }
        }

        endpoints.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(endpoints)
    }

    async fn delete_endpoint(&self, endpoint_id: &str) -> Result<bool> {
        let tree = self.endpoints_tree()?;
        let removed = tree.remove(endpoint_id.as_bytes()).map_err(storage_error)?;
        Ok(removed.is_some())
    }

    async fn record_payment(&self, payment: SettledPayment) -> Result<()> {
        let tree = self.payments_tree()?;
        let json = serde_json::to_vec(&payment).map_err(decode_error)?;

        tree.insert(payment.payment_hash.as_bytes(), json)
            .map_err(storage_error)?;

        Ok(())
    }

    async fn find_payment(&self, payment_hash: &str) -> Result<Option<SettledPayment>> {
        let tree = self.payments_tree()?;

        match tree.get(payment_hash.as_bytes()).map_err(storage_error)? {
            Some(data) => Ok(Some(serde_json::from_slice(&data).map_err(decode_error)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::models::ProviderEndpoint;
    use chrono::Utc;
    use tempfile::TempDir;

    fn endpoint(user_id: &str, endpoint_id: &str) -> WebhookEndpoint {
        WebhookEndpoint::from_provider(
            user_id,
            ProviderEndpoint {
                id: endpoint_id.into(),
                url: "https://dash.example/hook".into(),
                description: "test".into(),
                filter_types: vec!["invoice.incoming.settled".into()],
                endpoint_secret: format!("secret-{endpoint_id}"),
                created_at: None,
            },
        )
    }

    #[tokio::test]
    async fn test_save_and_find_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledWebhookRepository::new(temp_dir.path().join("webhooks.sled")).unwrap();

        repo.save_endpoint(endpoint("alice", "ep_1")).await.unwrap();

        let found = repo.find_endpoint("ep_1").await.unwrap().unwrap();
        assert_eq!(found.user_id, "alice");
        assert_eq!(found.endpoint_secret, "secret-ep_1");

        assert!(repo.find_endpoint("ep_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_only_returns_owned_endpoints() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledWebhookRepository::new(temp_dir.path().join("webhooks.sled")).unwrap();

        repo.save_endpoint(endpoint("alice", "ep_1")).await.unwrap();
        repo.save_endpoint(endpoint("bob", "ep_2")).await.unwrap();
        repo.save_endpoint(endpoint("alice", "ep_3")).await.unwrap();

        let alice: Vec<String> = repo
            .list_user_endpoints("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.endpoint_id)
            .collect();
        assert_eq!(alice.len(), 2);
        assert!(alice.contains(&"ep_1".to_string()));
        assert!(alice.contains(&"ep_3".to_string()));

        assert!(repo.list_user_endpoints("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledWebhookRepository::new(temp_dir.path().join("webhooks.sled")).unwrap();

        repo.save_endpoint(endpoint("alice", "ep_1")).await.unwrap();

        assert!(repo.delete_endpoint("ep_1").await.unwrap());
        assert!(!repo.delete_endpoint("ep_1").await.unwrap());
        assert!(repo.find_endpoint("ep_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_payment_overwrites_by_hash() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SledWebhookRepository::new(temp_dir.path().join("webhooks.sled")).unwrap();

        let mut payment = SettledPayment {
            payment_hash: "ab12".into(),
            amount: Some(1000),
            currency: Some("BTC".into()),
            settled_at: None,
            endpoint_id: "ep_1".into(),
            received_at: Utc::now(),
        };
        repo.record_payment(payment.clone()).await.unwrap();

        payment.settled_at = Some("2024-01-01T00:00:00Z".into());
        repo.record_payment(payment.clone()).await.unwrap();

        let found = repo.find_payment("ab12").await.unwrap().unwrap();
        assert_eq!(found, payment);
        assert!(repo.find_payment("ffff").await.unwrap().is_none());
    }
}
