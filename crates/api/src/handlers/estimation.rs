//! Handlers for grind estimation endpoints.
//!
//! Both endpoints are thin wrappers: they take a catalog snapshot, resolve
//! the bonus profile, and delegate to `grindtracker_core::estimation`.
//!
//! Profile source, first match wins: the request's `profile`, the stored
//! profile of `user_id`, an empty profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use grindtracker_core::bonus::{BonusProfile, RecentBattle};
use grindtracker_core::estimation;
use grindtracker_core::progress::ProgressMap;
use grindtracker_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /estimates`.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub vehicle_id: DbId,
    #[serde(default)]
    pub rp_current: i64,
    #[serde(default)]
    pub profile: Option<BonusProfile>,
    /// Shorthand for `profile.recent_battles`; takes precedence when present.
    #[serde(default)]
    pub recent_battles: Option<Vec<RecentBattle>>,
    /// Owner of the stored profile to use when `profile` is absent.
    #[serde(default)]
    pub user_id: Option<DbId>,
}

/// Body for `POST /estimates/cascade`.
#[derive(Debug, Deserialize)]
pub struct CascadeRequest {
    pub vehicle_id: DbId,
    #[serde(default)]
    pub profile: Option<BonusProfile>,
    #[serde(default)]
    pub recent_battles: Option<Vec<RecentBattle>>,
    /// Explicit progress. When absent, the stored progress of `user_id` is used.
    #[serde(default)]
    pub progress_map: Option<ProgressMap>,
    #[serde(default)]
    pub user_id: Option<DbId>,
}

/// Pick the profile for a request and fold the top-level `recent_battles`
/// shorthand into it.
async fn resolve_profile(
    state: &AppState,
    profile: Option<BonusProfile>,
    user_id: Option<DbId>,
    recent: Option<Vec<RecentBattle>>,
) -> BonusProfile {
    let mut profile = match (profile, user_id) {
        (Some(profile), _) => profile,
        (None, Some(user_id)) => state.profiles.get(user_id).await.unwrap_or_default(),
        (None, None) => BonusProfile::default(),
    };
    if let Some(samples) = recent {
        profile.recent_battles = samples;
    }
    profile
}

// ---------------------------------------------------------------------------
// POST /estimates
// ---------------------------------------------------------------------------

/// Estimate the grind for one vehicle.
pub async fn estimate_vehicle(
    State(state): State<AppState>,
    Json(body): Json<EstimateRequest>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    let profile =
        resolve_profile(&state, body.profile, body.user_id, body.recent_battles).await;

    let estimate = estimation::estimate_single(
        &catalog,
        body.vehicle_id,
        body.rp_current,
        &profile,
        &state.config.bonus,
    )?;

    tracing::info!(
        vehicle_id = body.vehicle_id,
        rp_remaining = estimate.rp_remaining,
        status = ?estimate.totals.status,
        battles = ?estimate.totals.battles_needed,
        "Vehicle estimate computed"
    );

    Ok(Json(DataResponse { data: estimate }))
}

// ---------------------------------------------------------------------------
// POST /estimates/cascade
// ---------------------------------------------------------------------------

/// Estimate the grind for a vehicle and all of its prerequisites.
pub async fn estimate_cascade(
    State(state): State<AppState>,
    Json(body): Json<CascadeRequest>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    let profile =
        resolve_profile(&state, body.profile, body.user_id, body.recent_battles).await;

    let progress = match (body.progress_map, body.user_id) {
        (Some(map), _) => map,
        (None, Some(user_id)) => state.progress.progress_map(user_id).await,
        (None, None) => ProgressMap::new(),
    };

    let estimate = estimation::estimate_cascade(
        &catalog,
        body.vehicle_id,
        &profile,
        &progress,
        &state.config.bonus,
    )?;

    tracing::info!(
        vehicle_id = body.vehicle_id,
        required = estimate.required_ids.len(),
        rp_total_remaining = estimate.rp_total_remaining,
        status = ?estimate.totals.status,
        battles = ?estimate.totals.battles_needed,
        "Cascade estimate computed"
    );

    Ok(Json(DataResponse { data: estimate }))
}
