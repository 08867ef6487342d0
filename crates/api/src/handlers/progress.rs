//! Handlers for per-user research progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use grindtracker_core::error::CoreError;
use grindtracker_core::progress::ProgressReport;
use grindtracker_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /users/{user_id}/progress
// ---------------------------------------------------------------------------

pub async fn list_progress(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let records = state.progress.list(user_id).await;
    tracing::debug!(user_id, count = records.len(), "Listed progress");
    Ok(Json(DataResponse { data: records }))
}

// ---------------------------------------------------------------------------
// PUT /users/{user_id}/progress/{vehicle_id}
// ---------------------------------------------------------------------------

/// Report RP earned on a vehicle. Creates the record on first report.
pub async fn report_progress(
    State(state): State<AppState>,
    Path((user_id, vehicle_id)): Path<(DbId, DbId)>,
    Json(body): Json<ProgressReport>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    let rp_cost = catalog.require_vehicle(vehicle_id)?.rp_cost;

    let outcome = state
        .progress
        .report(user_id, vehicle_id, &body, rp_cost, chrono::Utc::now())
        .await?;

    tracing::info!(
        user_id,
        vehicle_id,
        rp_earned = outcome.record.rp_earned,
        status = outcome.record.status.as_str(),
        created = outcome.created,
        "Progress reported"
    );

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: outcome.record })))
}

// ---------------------------------------------------------------------------
// DELETE /users/{user_id}/progress/{vehicle_id}
// ---------------------------------------------------------------------------

pub async fn delete_progress(
    State(state): State<AppState>,
    Path((user_id, vehicle_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !state.progress.remove(user_id, vehicle_id).await {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Progress",
            id: vehicle_id,
        }));
    }
    tracing::info!(user_id, vehicle_id, "Progress removed");
    Ok(StatusCode::NO_CONTENT)
}
