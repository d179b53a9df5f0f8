use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use devconnect_api::app::app;
use devconnect_api::config::{self, DatabaseConfig, StoreBackend};
use devconnect_api::database::open_store;
use devconnect_api::services::GithubClient;
use devconnect_api::state::AppState;

/// DevConnect API server
#[derive(Debug, Parser)]
#[command(name = "devconnect-api", version, about)]
struct Args {
    /// Port to listen on (overrides PORT and the environment preset)
    #[arg(short, long)]
    port: Option<u16>,

    /// Use the in-memory store regardless of DATABASE_URL
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devconnect_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting DevConnect API in {:?} mode", config.environment);

    let database = if args.memory {
        DatabaseConfig {
            backend: StoreBackend::Memory,
            ..config.database.clone()
        }
    } else {
        config.database.clone()
    };

    let store = open_store(&database).await.context("failed to open document store")?;
    let github = GithubClient::new(config.github.clone()).context("failed to build GitHub client")?;
    let state = AppState::new(store.clone(), github);

    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("DevConnect API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Store closed, shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
