//! Read-only catalog endpoints.
//!
//! Listing, single lookup, prerequisite sets and folder variants. Every
//! handler works on one catalog snapshot taken at the start of the request.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use grindtracker_core::catalog::VehicleFilter;
use grindtracker_core::prerequisites::{
    folder_variants, immediate_prerequisites, transitive_prerequisites,
};
use grindtracker_core::types::DbId;
use grindtracker_core::vehicle::{Vehicle, VehicleClass, VehicleType};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters / responses
// ---------------------------------------------------------------------------

/// Query parameters for `GET /vehicles`.
#[derive(Debug, Deserialize)]
pub struct ListVehiclesParams {
    pub nation: Option<String>,
    pub class: Option<VehicleClass>,
    pub rank: Option<u8>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paged listing payload.
#[derive(Debug, Serialize)]
pub struct VehiclePage {
    pub total: usize,
    pub items: Vec<Vehicle>,
}

/// Prerequisite ids of one vehicle.
#[derive(Debug, Serialize)]
pub struct PrerequisiteSet {
    pub vehicle_id: DbId,
    pub immediate: Vec<DbId>,
    pub transitive: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// GET /vehicles
// ---------------------------------------------------------------------------

/// List vehicles in rank / battle rating / name order.
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<ListVehiclesParams>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    let filter = VehicleFilter {
        nation: params.nation,
        class: params.class,
        rank: params.rank,
        vehicle_type: params.vehicle_type,
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .bounds();

    let matching = catalog.list(&filter);
    let total = matching.len();
    let items: Vec<Vehicle> = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    tracing::debug!(total, returned = items.len(), "Listed vehicles");

    Ok(Json(DataResponse {
        data: VehiclePage { total, items },
    }))
}

// ---------------------------------------------------------------------------
// GET /vehicles/{id}
// ---------------------------------------------------------------------------

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    let vehicle = catalog.require_vehicle(id)?.clone();
    Ok(Json(DataResponse { data: vehicle }))
}

// ---------------------------------------------------------------------------
// GET /vehicles/{id}/prerequisites
// ---------------------------------------------------------------------------

/// Immediate and transitive prerequisite ids.
pub async fn get_prerequisites(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    catalog.require_vehicle(id)?;

    let data = PrerequisiteSet {
        vehicle_id: id,
        immediate: immediate_prerequisites(&catalog, id).into_iter().collect(),
        transitive: transitive_prerequisites(&catalog, id).into_iter().collect(),
    };
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// GET /vehicles/{id}/variants
// ---------------------------------------------------------------------------

/// Variants nested under a vehicle, in unlock order.
pub async fn list_variants(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let catalog = state.catalog.snapshot().await;
    catalog.require_vehicle(id)?;

    let variants: Vec<Vehicle> = folder_variants(&catalog, id).into_iter().cloned().collect();
    Ok(Json(DataResponse { data: variants }))
}
