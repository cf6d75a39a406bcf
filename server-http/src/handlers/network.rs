use crate::api::ConnectionTestResponse;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use nodewatch::stats::{placeholder, StatQuery};
use serde_json::Value;
use tracing::warn;

/// Serve a network-wide query, falling back to placeholder data when enabled
async fn serve(state: &AppState, query: StatQuery) -> Result<Json<Value>, ApiError> {
    match state.basic.query(&query).await {
        Ok(value) => Ok(Json(value)),
        Err(err) if state.use_placeholder_data => {
            match placeholder::for_query(&query, Utc::now().date_naive()) {
                Some(value) => {
                    warn!(query = %query.cache_key(), error = %err, "Serving placeholder data");
                    Ok(Json(value))
                }
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/network-summary
pub async fn network_summary(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    serve(&state, StatQuery::NetworkSummary).await
}

/// GET /api/network-graph
pub async fn network_graph(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    serve(&state, StatQuery::SimplifiedNetworkGraph).await
}

/// GET /api/centralities
pub async fn centralities(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    serve(&state, StatQuery::TopCentralities).await
}

/// GET /api/fee-market/overview
pub async fn fee_market_overview(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    serve(&state, StatQuery::FeeMarketOverview).await
}

/// GET /api/historical
pub async fn historical(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    serve(&state, StatQuery::LimitedHistoricalData).await
}

/// GET /api/test-mcp
///
/// 200 when the statistics service answers its health check, 502 otherwise.
pub async fn test_connection(
    State(state): State<AppState>,
) -> (StatusCode, Json<ConnectionTestResponse>) {
    if state.basic.test_connection().await {
        (
            StatusCode::OK,
            Json(ConnectionTestResponse {
                status: "success",
                message: "Statistics service is reachable".to_string(),
            }),
        )
    } else {
        (
            StatusCode::BAD_GATEWAY,
            Json(ConnectionTestResponse {
                status: "error",
                message: "Statistics service is unreachable".to_string(),
            }),
        )
    }
}
