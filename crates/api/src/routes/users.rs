//! Route definitions for per-user data.
//!
//! ```text
//! GET    /{user_id}/profile                  get_profile
//! PUT    /{user_id}/profile                  put_profile
//! GET    /{user_id}/progress                 list_progress
//! PUT    /{user_id}/progress/{vehicle_id}    report_progress
//! DELETE /{user_id}/progress/{vehicle_id}    delete_progress
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{profile, progress};
use crate::state::AppState;

/// User routes, mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{user_id}/profile",
            get(profile::get_profile).put(profile::put_profile),
        )
        .route("/{user_id}/progress", get(progress::list_progress))
        .route(
            "/{user_id}/progress/{vehicle_id}",
            put(progress::report_progress).delete(progress::delete_progress),
        )
}
