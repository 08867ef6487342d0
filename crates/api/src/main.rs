use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grindtracker_api::config::ServerConfig;
use grindtracker_api::router::build_app_router;
use grindtracker_api::state::AppState;
use grindtracker_api::store::{CatalogStore, ProfileStore, ProgressStore};
use grindtracker_core::catalog::Catalog;
use grindtracker_core::importer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grindtracker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        premium_multiplier = config.bonus.premium_multiplier,
        rp_per_golden_eagle = config.bonus.rp_per_golden_eagle,
        "Loaded server configuration"
    );

    // --- Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("Failed to read catalog {}: {e}", path.display()));
            let (catalog, report) = importer::import_json(&raw)
                .unwrap_or_else(|e| panic!("Failed to import catalog {}: {e}", path.display()));
            for warning in &report.warnings {
                tracing::warn!(%warning, "Catalog import warning");
            }
            tracing::info!(
                path = %path.display(),
                vehicles = report.vehicles,
                edges = report.edges,
                "Catalog loaded"
            );
            catalog
        }
        None => {
            tracing::warn!("CATALOG_PATH not set, starting with an empty catalog");
            Catalog::default()
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(CatalogStore::new(catalog)),
        progress: Arc::new(ProgressStore::new()),
        profiles: Arc::new(ProfileStore::new()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix) to start graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
