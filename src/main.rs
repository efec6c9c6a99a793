//! JobHub Server: authenticated background-job submission and status polling.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use jobhub_api::AppState;
use jobhub_auth::{CredentialStore, MemoryCredentialStore};
use jobhub_broker::BrokerManager;
use jobhub_core::config::AppConfig;
use jobhub_core::error::AppError;
use jobhub_worker::{JobHandler, SimulatedTaskHandler, WorkerRunner};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("JOBHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.server.environment,
        "Starting JobHub"
    );
    let config = Arc::new(config);

    // ── Step 1: Initialize job transport ─────────────────────────
    tracing::info!(provider = %config.broker.provider, "Initializing broker...");
    let broker = BrokerManager::new(&config.broker).await?;
    tracing::info!("Broker initialized");

    // ── Step 2: Initialize credential store ──────────────────────
    let credentials: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());

    // ── Step 3: Wire services ────────────────────────────────────
    let app_state = AppState::new(Arc::clone(&config), broker, credentials);

    // ── Step 4: Start worker pool ────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_handle = if config.worker.enabled {
        let handler: Arc<dyn JobHandler> =
            Arc::new(SimulatedTaskHandler::from_config(&config.worker));
        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let runner = WorkerRunner::new(
            Arc::clone(&app_state.queue),
            handler,
            config.worker.clone(),
            worker_id,
        );

        tracing::info!(
            concurrency = config.worker.concurrency,
            time_unit_millis = config.worker.time_unit_millis,
            "Starting worker pool"
        );
        let rx = shutdown_rx.clone();
        Some(tokio::spawn(async move { runner.run(rx).await }))
    } else {
        tracing::info!("Worker pool disabled");
        None
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = jobhub_api::build_app(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("JobHub server listening on {addr}");

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Wait for in-flight jobs ──────────────────────────
    if let Some(handle) = worker_handle {
        tracing::info!("Waiting for in-flight jobs to complete...");
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Worker pool did not stop within the grace period");
        }
    }

    tracing::info!("JobHub server shut down gracefully");
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
