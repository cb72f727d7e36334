use std::sync::Arc;

use notes_api::{app, config, repository::Repository, service::NoteService};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes API config");

    // Repository creation and schema setup
    let repo = Repository::new(&cfg.pg_dsn, cfg.pool_max_size).unwrap_or_else(|e| {
        tracing::error!("Failed to create database pool: {e}");
        panic!("failed to create database pool: {e}");
    });

    repo.ensure_schema().await.unwrap_or_else(|e| {
        tracing::error!("Failed to create notes table: {e}");
        panic!("failed to create notes table: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // Router config
    let cors = app::cors_layer(&cfg.cors_origin).unwrap_or_else(|e| {
        tracing::error!("Invalid CORS origin '{}': {e}", cfg.cors_origin);
        panic!("invalid CORS origin: {e}");
    });
    let router = app::router(service, cors);

    let listener = tokio::net::TcpListener::bind(cfg.socket_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.socket_addr());
            panic!("failed to bind to address: {e}");
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes API listening on {}", addr),
        Err(e) => tracing::warn!("Listening on unknown address: {e}"),
    }
    tracing::info!("Allowing cross-origin requests from {}", cfg.cors_origin);

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
