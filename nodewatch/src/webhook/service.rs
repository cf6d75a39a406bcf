use super::models::{
    DeliveryOutcome, EndpointRegistration, IncomingEvent, SettledPayment, WebhookEndpoint,
    INVOICE_SETTLED,
};
use super::repository::WebhookRepository;
use super::signature::verify_signature;
use crate::ports::WebhookProvider;
use chrono::Utc;
use shared::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registers payment-provider webhook endpoints per user and authenticates
/// incoming deliveries against the stored endpoint secret.
#[derive(Clone)]
pub struct WebhookService {
    repository: Arc<dyn WebhookRepository>,
    provider: Arc<dyn WebhookProvider>,
}

impl WebhookService {
    pub fn new(repository: Arc<dyn WebhookRepository>, provider: Arc<dyn WebhookProvider>) -> Self {
        Self {
            repository,
            provider,
        }
    }

    pub async fn register(
        &self,
        user_id: &str,
        registration: EndpointRegistration,
    ) -> Result<WebhookEndpoint> {
        registration.validate()?;

        let created = self.provider.create_endpoint(&registration).await?;
        let endpoint = WebhookEndpoint::from_provider(user_id, created);
        let endpoint = self.repository.save_endpoint(endpoint).await?;

        info!(
            user_id = %user_id,
            endpoint_id = %endpoint.endpoint_id,
            "Webhook endpoint registered"
        );
        Ok(endpoint)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<WebhookEndpoint>> {
        self.repository.list_user_endpoints(user_id).await
    }

    /// Delete an endpoint at the provider and locally. Only the owner may do this.
    pub async fn remove(&self, user_id: &str, endpoint_id: &str) -> Result<()> {
        let endpoint = self
            .repository
            .find_endpoint(endpoint_id)
            .await?
            .ok_or(Error::NotFound)?;

        if endpoint.user_id != user_id {
            warn!(
                user_id = %user_id,
                endpoint_id = %endpoint_id,
                "Refusing to delete webhook endpoint owned by another user"
            );
            return Err(Error::AccessDenied(
                "webhook endpoint belongs to another user".into(),
            ));
        }

        self.provider.delete_endpoint(endpoint_id).await?;
        self.repository.delete_endpoint(endpoint_id).await?;

        info!(user_id = %user_id, endpoint_id = %endpoint_id, "Webhook endpoint deleted");
        Ok(())
    }

    /// Authenticate and apply one webhook delivery.
    ///
    /// Checks run in a fixed order: the signature header must be present,
    /// the endpoint must be known, the signature must match the raw payload
    /// under that endpoint's secret, and only then is the payload parsed.
    /// Nothing is recorded unless every check passes.
    pub async fn handle_delivery(
        &self,
        endpoint_id: Option<&str>,
        signature: Option<&str>,
        payload: &[u8],
    ) -> Result<DeliveryOutcome> {
        let signature = signature
            .filter(|s| !s.trim().is_empty())
            .ok_or(Error::InvalidSignature)?;

        let endpoint_id = endpoint_id.ok_or(Error::NotFound)?;
        let endpoint = self
            .repository
            .find_endpoint(endpoint_id)
            .await?
            .ok_or(Error::NotFound)?;

        if !verify_signature(payload, signature, endpoint.endpoint_secret.as_bytes()) {
            warn!(endpoint_id = %endpoint_id, "Webhook signature mismatch");
            return Err(Error::InvalidSignature);
        }

        let event: IncomingEvent = serde_json::from_slice(payload)
            .map_err(|e| Error::Validation(format!("invalid webhook payload: {e}")))?;

        if event.event_type != INVOICE_SETTLED {
            debug!(event_type = %event.event_type, "Ignoring webhook event");
            return Ok(DeliveryOutcome::Ignored {
                event_type: event.event_type,
            });
        }

        let payment_hash = event
            .payment_hash
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::Validation("settled event has no payment_hash".into()))?;

        let payment = SettledPayment {
            payment_hash,
            amount: event.amount,
            currency: event.currency,
            settled_at: event.settled_at,
            endpoint_id: endpoint.endpoint_id,
            received_at: Utc::now(),
        };
        self.repository.record_payment(payment.clone()).await?;

        info!(
            payment_hash = %payment.payment_hash,
            amount = ?payment.amount,
            "Payment settled"
        );
        Ok(DeliveryOutcome::PaymentSettled(payment))
    }

    /// Look up a settled payment. Only the owner of the endpoint it arrived on may read it.
    pub async fn payment(&self, user_id: &str, payment_hash: &str) -> Result<SettledPayment> {
        let payment = self
            .repository
            .find_payment(payment_hash)
            .await?
            .ok_or(Error::NotFound)?;

        let owner = self
            .repository
            .find_endpoint(&payment.endpoint_id)
            .await?
            .map(|endpoint| endpoint.user_id);

        if owner.as_deref() != Some(user_id) {
            warn!(
                user_id = %user_id,
                payment_hash = %payment_hash,
                "Refusing to show payment received on another user's endpoint"
            );
            return Err(Error::AccessDenied(
                "payment belongs to another user".into(),
            ));
        }

        Ok(payment)
    }
}
