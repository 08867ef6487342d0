//! Route definitions for administrative operations.
//!
//! ```text
//! POST /catalog/import     import_catalog
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes, mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/catalog/import", post(admin::import_catalog))
}
