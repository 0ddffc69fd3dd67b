//! Lodestone - AT-URI resolution service
//!
//! Resolves `at://` URIs to records, collection listings and repository
//! descriptions by way of the owning account's DID document and PDS.

use lodestone::{start_server, Config, Resolver, Result, ServerState, SharedState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("lodestone=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Lodestone...");

    let config = Config::from_env()?;
    info!("Port: {}", config.port);
    info!("PLC directory: {}", config.plc_directory_url);
    info!("Request timeout: {:?}", config.request_timeout);
    info!(
        "Cache capacity: {} DID documents, {} XRPC responses",
        config.did_cache_capacity, config.xrpc_cache_capacity
    );

    let resolver = Resolver::from_config(&config)?;
    let state: SharedState = Arc::new(ServerState::new(resolver));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}
