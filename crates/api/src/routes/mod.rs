pub mod admin;
pub mod estimation;
pub mod health;
pub mod users;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vehicles                                  list (?nation, class, rank, type, limit, offset)
/// /vehicles/{id}                             get
/// /vehicles/{id}/prerequisites               immediate + transitive ids
/// /vehicles/{id}/variants                    folder variants in unlock order
///
/// /estimates                                 single vehicle estimate (POST)
/// /estimates/cascade                         target + prerequisites estimate (POST)
///
/// /users/{user_id}/profile                   get, replace (PUT)
/// /users/{user_id}/progress                  list
/// /users/{user_id}/progress/{vehicle_id}     report (PUT), forget (DELETE)
///
/// /admin/catalog/import                      replace catalog (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicles::router())
        .nest("/estimates", estimation::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
}
