//! Zenith Drive server
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing_subscriber::{EnvFilter, fmt};

use zenith_core::config::AppConfig;
use zenith_core::error::AppError;
use zenith_database::Stores;
use zenith_realtime::RealtimeEngine;
use zenith_service::StripeGateway;
use zenith_storage::StorageManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("ZENITH_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Zenith Drive v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores (PostgreSQL or in-memory) ─────────────────
    tracing::info!(provider = %config.database.provider, "Initializing stores...");
    let (stores, db_pool) = Stores::from_config(&config.database).await?;

    // ── Step 2: Object storage ───────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing object storage...");
    let storage = StorageManager::from_config(
        &config.storage,
        &config.server.public_base_url,
        &config.auth.jwt_secret,
    )
    .await?;

    // ── Step 3: Realtime engine ──────────────────────────────────
    let realtime = RealtimeEngine::new(&config.realtime);

    // ── Step 4: Payment gateway ──────────────────────────────────
    let gateway = Arc::new(StripeGateway::new(config.billing.clone())?);

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = zenith_api::AppState::new(config, stores, storage, realtime, gateway);
    let realtime = state.realtime.clone();
    let app = zenith_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Zenith Drive listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let (draining_tx, draining_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            realtime.shutdown();
            let _ = draining_tx.send(());
        })
        .into_future();

    // In-flight requests get `shutdown_grace_seconds` to finish.
    let deadline = async {
        match draining_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = deadline => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
        }
    }

    // ── Step 7: Release resources ────────────────────────────────
    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Zenith Drive shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
