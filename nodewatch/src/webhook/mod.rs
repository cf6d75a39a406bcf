pub mod models;
pub mod repository;
pub mod service;
pub mod signature;

pub use models::{
    DeliveryOutcome, EndpointRegistration, IncomingEvent, ProviderEndpoint, SettledPayment,
    WebhookEndpoint, INVOICE_SETTLED,
};
pub use repository::{SledWebhookRepository, WebhookRepository};
pub use service::WebhookService;
pub use signature::{sign, verify_signature};
