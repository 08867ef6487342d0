use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Vehicles in the current catalog snapshot.
    pub vehicles: usize,
    /// Edges in the current catalog snapshot.
    pub edges: usize,
}

/// GET /health -- returns service status and catalog size.
///
/// An empty catalog reports `degraded`: the server is up but cannot
/// answer estimates until a catalog is imported.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.catalog.snapshot().await.stats();

    let status = if stats.vehicles > 0 { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        vehicles: stats.vehicles,
        edges: stats.edges,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
