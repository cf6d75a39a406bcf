use crate::api::{AlertRequest, GrowthPredictionParams};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use nodewatch::auth::User;
use nodewatch::stats::Timeframe;
use serde_json::Value;

type JsonResult = Result<Json<Value>, ApiError>;

/// GET /api/node/{node_id}/stats
pub async fn node_stats(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
) -> JsonResult {
    Ok(Json(state.premium.node_stats(&user, &node_id).await?))
}

/// GET /api/node/{node_id}/centrality
pub async fn node_centrality(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
) -> JsonResult {
    Ok(Json(state.premium.node_centrality(&user, &node_id).await?))
}

/// GET /api/node/{node_id}/liquidity
pub async fn node_liquidity(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
) -> JsonResult {
    Ok(Json(state.premium.node_liquidity(&user, &node_id).await?))
}

/// GET /api/node/{node_id}/fee-recommendations
pub async fn fee_recommendations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
) -> JsonResult {
    Ok(Json(state.premium.fee_recommendations(&user, &node_id).await?))
}

/// GET /api/node/{node_id}/history
pub async fn node_history(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
) -> JsonResult {
    Ok(Json(state.premium.node_history(&user, &node_id).await?))
}

/// GET /api/node/{node_id}/growth-prediction?timeframe=7d|30d|90d
pub async fn growth_prediction(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
    Query(params): Query<GrowthPredictionParams>,
) -> JsonResult {
    let timeframe = match params.timeframe.as_deref() {
        Some(raw) => raw.parse::<Timeframe>()?,
        None => Timeframe::default(),
    };

    Ok(Json(
        state
            .premium
            .growth_prediction(&user, &node_id, timeframe)
            .await?,
    ))
}

/// POST /api/node/{node_id}/optimize
pub async fn optimize_node(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(node_id): Path<String>,
) -> JsonResult {
    Ok(Json(state.premium.optimize_node(&user, &node_id).await?))
}

/// POST /api/alerts
pub async fn configure_alert(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    body: Result<Json<AlertRequest>, JsonRejection>,
) -> JsonResult {
    let Json(alert) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    Ok(Json(state.premium.configure_alert(&user, &alert).await?))
}
