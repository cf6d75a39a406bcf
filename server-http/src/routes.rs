use crate::handlers;
use crate::middleware::{auth_middleware, require_admin};
use crate::state::AppState;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use shared::config::Config;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::warn;

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-alby-signature"),
            HeaderName::from_static("x-alby-endpoint-id"),
        ])
        .max_age(Duration::from_secs(60 * 60));

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let admin = Router::new()
        .route(
            "/api/admin/users",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route("/api/admin/users/{user_id}", get(handlers::get_user))
        .route("/api/admin/users/{user_id}/tier", put(handlers::set_tier))
        .route(
            "/api/admin/users/{user_id}/grants",
            post(handlers::grant_node_access),
        )
        .route_layer(middleware::from_fn(require_admin));

    // Everything here needs Basic credentials or a session token
    let protected = Router::new()
        .route("/api/node/{node_id}/stats", get(handlers::node_stats))
        .route("/api/node/{node_id}/centrality", get(handlers::node_centrality))
        .route("/api/node/{node_id}/liquidity", get(handlers::node_liquidity))
        .route(
            "/api/node/{node_id}/fee-recommendations",
            get(handlers::fee_recommendations),
        )
        .route("/api/node/{node_id}/history", get(handlers::node_history))
        .route(
            "/api/node/{node_id}/growth-prediction",
            get(handlers::growth_prediction),
        )
        .route("/api/node/{node_id}/optimize", post(handlers::optimize_node))
        .route("/api/alerts", post(handlers::configure_alert))
        .route(
            "/api/webhooks/alby",
            post(handlers::register_webhook).get(handlers::list_webhooks),
        )
        .route(
            "/api/webhooks/alby/{endpoint_id}",
            delete(handlers::delete_webhook),
        )
        .route("/api/payments/{payment_hash}", get(handlers::get_payment))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Sessions
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        // Network statistics
        .route("/api/network-summary", get(handlers::network_summary))
        .route("/api/network-graph", get(handlers::network_graph))
        .route("/api/centralities", get(handlers::centralities))
        .route("/api/fee-market/overview", get(handlers::fee_market_overview))
        .route("/api/historical", get(handlers::historical))
        .route("/api/test-mcp", get(handlers::test_connection))
        // Signed payment-provider deliveries
        .route(
            "/api/webhooks/alby/incoming",
            post(handlers::incoming_webhook),
        )
        .merge(protected)
        // Middleware
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The router as served. Trailing slashes are trimmed before routing, so
/// `/api/network-summary/` reaches the same handler as `/api/network-summary`.
pub fn build_app(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(build_router(state, config))
}
