use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod scheduler;
mod services;
mod utils;

use config::BotConfig;
use services::analysis::AnalysisContext;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("🤖 Starting cryptopulse...");

    let cfg = match BotConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!(
        "Configuration loaded: chat_id={}, news providers configured: newsapi={}, gnews={}",
        cfg.chat_id,
        cfg.news_api_key.is_some(),
        cfg.gnews_api_key.is_some()
    );

    let addr: SocketAddr = match format!("{}:{}", cfg.bind, cfg.port).parse() {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid bind address {}:{}: {}", cfg.bind, cfg.port, e);
            return;
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    info!("Liveness endpoint listening on http://{}", addr);

    // The listener is ready: start the scheduling loop, exactly once for the
    // process lifetime.
    let ctx = Arc::new(AnalysisContext::new(&cfg));
    tokio::spawn(scheduler::run(Arc::clone(&ctx)));

    let app = Router::new().route("/", get(home));

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "alive" }))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("Failed to install Ctrl+C handler");
        return;
    }
    info!("Shutdown signal received, stopping...");
}
