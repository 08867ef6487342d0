//! Handlers for the per-user bonus profile.
//!
//! Estimate requests that carry a `user_id` but no `profile` fall back to
//! the profile stored here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use grindtracker_core::bonus::BonusProfile;
use grindtracker_core::error::CoreError;
use grindtracker_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /users/{user_id}/profile
// ---------------------------------------------------------------------------

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .profiles
        .get(user_id)
        .await
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            id: user_id,
        })?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// PUT /users/{user_id}/profile
// ---------------------------------------------------------------------------

/// Replace the user's bonus profile.
pub async fn put_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(body): Json<BonusProfile>,
) -> AppResult<impl IntoResponse> {
    let created = state.profiles.put(user_id, body.clone()).await?;

    tracing::info!(
        user_id,
        has_premium = body.has_premium,
        avg_rp_per_battle = ?body.avg_rp_per_battle,
        created,
        "Profile stored"
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: body })))
}
