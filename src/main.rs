//! blink-node: a Solana Actions endpoint serving one action.
//!
//! GET/OPTIONS return the action descriptor; POST builds an unsigned SOL
//! transfer transaction against a remote Solana RPC node and returns it
//! base64-encoded for the caller to sign.

mod actions;
mod app_state;
mod config;
mod error;
mod rpc;
mod routes;
mod transfer;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app_state::AppState;
use config::ActionConfig;
use rpc::RpcClient;

#[tokio::main]
async fn main() {
    // init tracing from env RUST_LOG or BLINK_LOG
    let filter = std::env::var("BLINK_LOG")
        .unwrap_or_else(|_| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ActionConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!(err = %e, "invalid configuration");
        std::process::exit(1);
    }
    info!(rpc = %config.masked_rpc_endpoint(), "blink node starting up");

    let rpc = match RpcClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(err = ?e, "failed to build RPC client");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let app = routes::create_router(Arc::new(AppState::new(config, rpc)));

    // Action clients are cross-origin by design, so CORS defaults to Any on
    // every response (errors included). BLINK_CORS_ORIGINS restricts to an
    // explicit comma-separated list; invalid entries are skipped.
    let cors = if let Ok(raw) = std::env::var("BLINK_CORS_ORIGINS") {
        use tower_http::cors::AllowOrigin;
        let mut list: Vec<HeaderValue> = Vec::new();
        for part in raw.split(',').map(|s| s.trim()) {
            if part.is_empty() {
                continue;
            }
            if let Ok(hv) = HeaderValue::from_str(part) {
                list.push(hv);
            }
        }
        if list.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(list))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };
    let app = app.layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(listen = %addr.to_string(), err = ?e, "failed to bind to address");
            std::process::exit(1);
        }
    };
    info!(listen = %addr.to_string(), "blink node listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .unwrap();
}
