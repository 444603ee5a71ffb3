//! REST API server for the LeanBuild construction-lean dashboard.
//!
//! Exposes CRUD routes for waste observations, recommendations, team
//! members, and Kaizen events, backed by the remote database proxy via
//! [`leanbuild::ProxyClient`].

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Result;
use leanbuild::ProxyClient;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Load configuration, wire up the proxy client, and serve until ctrl-c.
pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("leanbuild=info,leanbuild_server=info,tower_http=info")
        }))
        .init();

    let config = ServerConfig::from_env()?;
    let client = ProxyClient::new(config.proxy.clone())?;
    let state = AppState {
        db: Arc::new(client),
    };

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "leanbuild server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
