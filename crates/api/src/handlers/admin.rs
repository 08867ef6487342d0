//! Administrative catalog import.
//!
//! The new catalog is fully built and validated before it replaces the
//! current snapshot; a failed import leaves the old catalog in place.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use grindtracker_core::catalog::CatalogStats;
use grindtracker_core::importer::{self, ImportReport};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a catalog import.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub report: ImportReport,
    pub catalog: CatalogStats,
}

// ---------------------------------------------------------------------------
// POST /admin/catalog/import
// ---------------------------------------------------------------------------

/// Replace the catalog with the posted import document.
pub async fn import_catalog(
    State(state): State<AppState>,
    body: String,
) -> AppResult<impl IntoResponse> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("Import document is empty".into()));
    }

    let (catalog, report) = importer::import_json(&body)?;
    for warning in &report.warnings {
        tracing::warn!(%warning, "Catalog import warning");
    }

    let stats = catalog.stats();
    let previous = state.catalog.replace(catalog).await;

    tracing::info!(
        vehicles = stats.vehicles,
        edges = stats.edges,
        previous_vehicles = previous.stats().vehicles,
        warnings = report.warnings.len(),
        "Catalog replaced"
    );

    Ok(Json(DataResponse {
        data: ImportResult {
            report,
            catalog: stats,
        },
    }))
}
