use crate::api::{
    DeliveryResponse, ListWebhooksResponse, RegisterWebhookRequest, WebhookEndpointResponse,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use bytes::Bytes;
use nodewatch::auth::User;
use nodewatch::webhook::DeliveryOutcome;
use tracing::debug;

const SIGNATURE_HEADER: &str = "x-alby-signature";
const ENDPOINT_ID_HEADER: &str = "x-alby-endpoint-id";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}

/// POST /api/webhooks/alby
pub async fn register_webhook(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    body: Result<Json<RegisterWebhookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WebhookEndpointResponse>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let endpoint = state.webhooks.register(&user.id, request.into()).await?;

    Ok((StatusCode::CREATED, Json(endpoint.into())))
}

/// GET /api/webhooks/alby
pub async fn list_webhooks(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ListWebhooksResponse>, ApiError> {
    let endpoints = state.webhooks.list_for_user(&user.id).await?;

    Ok(Json(ListWebhooksResponse {
        endpoints: endpoints.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/webhooks/alby/{endpoint_id}
pub async fn delete_webhook(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(endpoint_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.webhooks.remove(&user.id, &endpoint_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/webhooks/alby/incoming
///
/// Authenticated by the HMAC signature over the raw body, not by user credentials.
pub async fn incoming_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DeliveryResponse>, ApiError> {
    let outcome = state
        .webhooks
        .handle_delivery(
            header_str(&headers, ENDPOINT_ID_HEADER),
            header_str(&headers, SIGNATURE_HEADER),
            &body,
        )
        .await?;

    if let DeliveryOutcome::Ignored { event_type } = outcome {
        debug!(event_type = %event_type, "Webhook acknowledged without action");
    }

    Ok(Json(DeliveryResponse { success: true }))
}
