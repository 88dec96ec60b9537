mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use clap::Parser;
use config::Config;
use matching_engine::router::Dispatcher;
use matching_engine::telemetry::LogTelemetry;
use router::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();
    tracing::info!(
        markets = ?config.markets,
        workers = config.worker_count(),
        "starting matching gateway"
    );

    let dispatcher = Arc::new(Dispatcher::new(
        &config.market_ids(),
        config.worker_count(),
        Arc::new(LogTelemetry),
    ));
    let state = AppState::new(Arc::clone(&dispatcher), config.depth);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Accepted orders still in the consumer queues are drained here
    dispatcher.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install shutdown handler");
    }
}
