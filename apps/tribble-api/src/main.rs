//! tribble API
//!
//! Credential and session service built with Axum: login, token refresh,
//! user accounts, and bearer-token protected routes.

mod app;
mod config;
mod health;
mod logging;
mod openapi;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing::info;
use tribble_api_auth::AuthState;
use tribble_auth::{CredentialStore, TokenIssuer, TokenValidator};
use tribble_db::{run_migrations, PgSessionRepository, SessionRepository};

use crate::config::Config;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        db_timeout_secs = config.db_timeout.as_secs(),
        "Starting tribble API"
    );

    let pool = match PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_timeout)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let repo: Arc<dyn SessionRepository> =
        Arc::new(PgSessionRepository::new(pool, config.db_timeout));
    let state = AuthState::new(
        repo,
        Arc::new(TokenIssuer::new(&config.jwt_secret)),
        Arc::new(TokenValidator::new(&config.jwt_secret)),
        CredentialStore::new(),
    );

    let app = app::build_router(state, &config.cors_origins);

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
