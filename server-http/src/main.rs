use axum::{extract::Request, ServiceExt};
use nodewatch::upstream::{AlbyWebhookProvider, HttpStatsUpstream};
use server_http::{build_app, AppState};
use shared::config::Config;
use shared::SystemClock;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting nodewatch HTTP server...");

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    let upstream = Arc::new(
        HttpStatsUpstream::new(config.stats_api_url.clone(), config.upstream_timeout)
            .expect("Failed to build statistics client"),
    );
    info!(url = %upstream.base_url(), "Statistics service configured");

    let provider = Arc::new(
        AlbyWebhookProvider::new(
            config.alby_api_url.clone(),
            config.alby_access_token.clone(),
            config.upstream_timeout,
        )
        .expect("Failed to build payment provider client"),
    );
    if config.alby_access_token.is_none() {
        info!("NODEWATCH_ALBY_ACCESS_TOKEN not set, webhook registration is disabled");
    }

    let state = AppState::build(&config, upstream, provider, Arc::new(SystemClock))
        .await
        .expect("Failed to initialize application state");

    let app = build_app(state, &config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind HTTP listener");

    info!("HTTP Server listening on http://{}", address);
    info!(
        "Try: curl -u {}:<password> http://localhost:{}/api/node/<pubkey>/stats",
        config.admin_username, config.http_port
    );

    // Graceful shutdown handler
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server error");

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
