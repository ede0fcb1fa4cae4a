use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use api::gamebanana::GameBananaClient;
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::from_default_env()
        .add_directive("banana_likes=debug".parse().expect("valid directive"))
        .add_directive("hyper=warn".parse().expect("valid directive"))
        .add_directive("reqwest=warn".parse().expect("valid directive"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🍌 Starting banana-likes v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env();
    info!(
        "GameBanana API: {} (max {} pages, {} per batch)",
        config.api_base_url, config.fetch_policy.max_pages, config.fetch_policy.batch_size
    );

    let client = match GameBananaClient::with_base_url(config.api_base_url.clone(), config.http_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create GameBanana client: {}", e);
            return;
        }
    };

    let addr: SocketAddr = match format!("{}:{}", config.bind, config.port).parse() {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid bind address {}:{}: {}", config.bind, config.port, e);
            return;
        }
    };

    let state = Arc::new(AppState { config, client });
    let app = routes::router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };

    info!("Listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping");
}
