//! Route definitions for the vehicle catalog.
//!
//! ```text
//! GET /                         list_vehicles
//! GET /{id}                     get_vehicle
//! GET /{id}/prerequisites       get_prerequisites
//! GET /{id}/variants            list_variants
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::vehicles;
use crate::state::AppState;

/// Vehicle routes, mounted at `/vehicles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vehicles::list_vehicles))
        .route("/{id}", get(vehicles::get_vehicle))
        .route("/{id}/prerequisites", get(vehicles::get_prerequisites))
        .route("/{id}/variants", get(vehicles::list_variants))
}
