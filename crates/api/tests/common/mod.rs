//! Shared helpers for the API integration tests. Not every test binary
//! uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use grindtracker_core::bonus::BonusConfig;
use grindtracker_core::catalog::Catalog;
use grindtracker_core::importer::import_json;
use http_body_util::BodyExt;
use tower::ServiceExt;

use grindtracker_api::config::ServerConfig;
use grindtracker_api::router::build_app_router;
use grindtracker_api::state::AppState;
use grindtracker_api::store::{CatalogStore, ProfileStore, ProgressStore};

/// Small US ground line used across the API tests.
///
/// Ids follow document order:
///
/// ```text
/// 1 m2     rank 1      0 RP
/// 2 m3     rank 2  12000 RP   (child of m2)
/// 3 m4     rank 3  20000 RP   (child of m3, folder)
/// 4 m4_v1  rank 3  21000 RP   (in m4, BR 3.3)
/// 5 m4_v2  rank 3  22000 RP   (in m4, BR 4.0)
/// 6 p47    rank 3  premium aircraft, BR 4.3, no RP cost
/// ```
pub const SAMPLE_CATALOG: &str = r#"{
    "nations": [{"slug": "usa", "name": "USA"}],
    "classes": ["army", "aviation"],
    "ranks": [1, 2, 3],
    "vehicles": [
        {"key": "m2", "name": "M2A4", "nation": "usa", "class": "army", "rank": 1,
         "br_rb": 1.0, "rp_cost": 0, "edges": {"children": ["m3"]}},
        {"key": "m3", "name": "M3 Lee", "nation": "usa", "class": "army", "rank": 2,
         "br_rb": 2.7, "rp_cost": 12000, "edges": {"children": ["m4"]}},
        {"key": "m4", "name": "M4 Sherman", "nation": "usa", "class": "army", "rank": 3,
         "br_rb": 3.7, "rp_cost": 20000},
        {"key": "m4_v1", "name": "M4A1", "nation": "usa", "class": "army", "rank": 3,
         "br_ab": 3.3, "rp_cost": 21000, "folder_of": "m4"},
        {"key": "m4_v2", "name": "M4A3 (76) W", "nation": "usa", "class": "army", "rank": 3,
         "br_ab": 4.0, "rp_cost": 22000, "folder_of": "m4"},
        {"key": "p47", "name": "P-47D", "nation": "usa", "class": "aviation", "rank": 3,
         "type": "premium", "br_rb": 4.3, "ge_cost": 2500}
    ]
}"#;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        catalog_path: None,
        bonus: BonusConfig::default(),
    }
}

pub fn sample_catalog() -> Catalog {
    import_json(SAMPLE_CATALOG).unwrap().0
}

/// Build the full application router around `catalog`, with the same
/// middleware stack production uses.
pub fn build_test_app(catalog: Catalog) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(CatalogStore::new(catalog)),
        progress: Arc::new(ProgressStore::new()),
        profiles: Arc::new(ProfileStore::new()),
    };
    build_app_router(state, &config)
}

/// Router around the sample catalog.
pub fn sample_app() -> Router {
    build_test_app(sample_catalog())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Body::from(json.to_string())).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty()).await
}

async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
