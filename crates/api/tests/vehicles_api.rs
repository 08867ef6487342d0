//! HTTP-level integration tests for the `/vehicles` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, sample_app};

fn ids(items: &serde_json::Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_all_in_presentation_order() {
    let response = get(sample_app(), "/api/v1/vehicles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 6);
    let listed = ids(&json["data"]["items"]);
    // Rank first, then battle rating: m4_v1 (3.3) < m4 (3.7) < m4_v2 (4.0) < p47 (4.3).
    assert_eq!(listed, vec![1, 2, 4, 3, 5, 6]);
}

#[tokio::test]
async fn list_filters_by_class_rank_and_type() {
    let json = body_json(get(sample_app(), "/api/v1/vehicles?class=army").await).await;
    assert_eq!(json["data"]["total"], 5);

    let json = body_json(get(sample_app(), "/api/v1/vehicles?rank=3").await).await;
    assert_eq!(json["data"]["total"], 4);

    let json = body_json(get(sample_app(), "/api/v1/vehicles?type=premium").await).await;
    assert_eq!(ids(&json["data"]["items"]), vec![6]);

    let json = body_json(get(sample_app(), "/api/v1/vehicles?nation=germany").await).await;
    assert_eq!(json["data"]["total"], 0);
}

#[tokio::test]
async fn list_paginates_after_filtering() {
    let json = body_json(get(sample_app(), "/api/v1/vehicles?limit=2&offset=1").await).await;
    assert_eq!(json["data"]["total"], 6);
    assert_eq!(ids(&json["data"]["items"]), vec![2, 4]);
}

#[tokio::test]
async fn list_rejects_unknown_class() {
    let response = get(sample_app(), "/api/v1/vehicles?class=boats").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Single lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_vehicle_by_id() {
    let response = get(sample_app(), "/api/v1/vehicles/2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "M3 Lee");
    assert_eq!(json["data"]["rank"], 2);
    assert_eq!(json["data"]["type"], "tree");
    assert_eq!(json["data"]["rp_cost"], 12000);
}

#[tokio::test]
async fn get_unknown_vehicle_returns_404() {
    let response = get(sample_app(), "/api/v1/vehicles/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Prerequisites and variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prerequisites_include_folder_and_previous_variant() {
    let response = get(sample_app(), "/api/v1/vehicles/5/prerequisites").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["vehicle_id"], 5);
    assert_eq!(json["data"]["immediate"], serde_json::json!([3, 4]));
    assert_eq!(json["data"]["transitive"], serde_json::json!([1, 2, 3, 4]));
}

#[tokio::test]
async fn root_vehicle_has_no_prerequisites() {
    let json = body_json(get(sample_app(), "/api/v1/vehicles/1/prerequisites").await).await;
    assert_eq!(json["data"]["immediate"], serde_json::json!([]));
    assert_eq!(json["data"]["transitive"], serde_json::json!([]));
}

#[tokio::test]
async fn variants_are_listed_in_unlock_order() {
    let json = body_json(get(sample_app(), "/api/v1/vehicles/3/variants").await).await;
    assert_eq!(ids(&json["data"]), vec![4, 5]);

    let json = body_json(get(sample_app(), "/api/v1/vehicles/2/variants").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = get(sample_app(), "/api/v1/vehicles/999/variants").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
