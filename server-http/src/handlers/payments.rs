use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use nodewatch::auth::User;
use nodewatch::webhook::SettledPayment;

/// GET /api/payments/{payment_hash}
pub async fn get_payment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(payment_hash): Path<String>,
) -> Result<Json<SettledPayment>, ApiError> {
    Ok(Json(state.webhooks.payment(&user.id, &payment_hash).await?))
}
