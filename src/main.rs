#![deny(unused)]
//! Convogate - Conversational Query Gateway
//!
//! Binds the HTTP dispatch layer to the production Session Client.
//! Bootstrap only: tracing, configuration, client construction, serve.

use std::sync::Arc;

use convogate_backend::HttpSessionClient;
use convogate_core::config::AppConfig;
use convogate_core::SessionClient;
use convogate_gateway::{GatewayConfig, GatewayServer, QueryBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    configure_tracing();

    tracing::info!("Starting Convogate v{}", env!("CARGO_PKG_VERSION"));

    // Configuration problems are fatal here, before serving begins.
    let config = AppConfig::load()?;
    config.validate()?;

    tracing::info!(project_id = %config.backend.project_id, "Using backend project");

    let client: Arc<dyn SessionClient> = Arc::new(HttpSessionClient::new(&config.backend)?);
    let queries = QueryBuilder::new(
        config.backend.project_id.clone(),
        config.backend.default_language.clone(),
    );

    let gateway = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        enable_cors: config.gateway.enable_cors,
        enable_tracing: config.gateway.enable_tracing,
    };

    GatewayServer::new(gateway, queries, client).run().await?;

    Ok(())
}

/// Stdout logging with an env-driven filter.
fn configure_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,convogate=debug".into()),
    );

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
