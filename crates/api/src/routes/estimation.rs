//! Route definitions for grind estimates.
//!
//! ```text
//! POST /            estimate_vehicle
//! POST /cascade     estimate_cascade
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::estimation;
use crate::state::AppState;

/// Estimate routes, mounted at `/estimates`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(estimation::estimate_vehicle))
        .route("/cascade", post(estimation::estimate_cascade))
}
