//! HTTP-level integration tests for the generic document endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, encode_query_value, get, get_auth, patch_json_auth,
    post_json_auth, put_json_auth,
};
use serde_json::{json, Value};

const SERVICES: &str = "/api/v1/admin/collections/services/documents";

async fn add(app: axum::Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app, SERVICES, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[tokio::test]
async fn documents_require_admin() {
    let app = common::build_test_app();
    let response = get(app, SERVICES).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_assigns_id_and_ignores_reserved_fields() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;

    let doc = add(
        app.clone(),
        &token,
        json!({ "id": "forged", "createdAt": "1999-01-01T00:00:00Z", "title": "Web" }),
    )
    .await;

    let id = doc["id"].as_str().unwrap();
    assert_ne!(id, "forged");
    assert_eq!(doc["title"], "Web");
    assert_ne!(doc["createdAt"], "1999-01-01T00:00:00Z");

    let response = get_auth(app, &format!("{SERVICES}/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Web");
}

#[tokio::test]
async fn list_applies_filters() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;
    add(app.clone(), &token, json!({ "title": "Web", "rank": 1 })).await;
    add(app.clone(), &token, json!({ "title": "Video", "rank": 2 })).await;
    add(app.clone(), &token, json!({ "title": "Design", "rank": 3 })).await;

    let response = get_auth(app.clone(), SERVICES, &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    let filters = json!([{ "field": "rank", "op": ">=", "value": 2 }]).to_string();
    let uri = format!("{SERVICES}?filters={}", encode_query_value(&filters));
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let docs = body_json(response).await["data"].clone();
    let mut titles: Vec<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Design", "Video"]);

    let uri = format!("{SERVICES}?filters={}", encode_query_value("not json"));
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_merges_fields() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;
    let doc = add(app.clone(), &token, json!({ "title": "Web", "description": "Sites" })).await;
    let uri = format!("{SERVICES}/{}", doc["id"].as_str().unwrap());

    let response = patch_json_auth(app, &uri, &token, json!({ "title": "Web Development" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["title"], "Web Development");
    assert_eq!(updated["description"], "Sites");
}

#[tokio::test]
async fn patch_of_missing_document_is_404() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;
    let response = patch_json_auth(app, &format!("{SERVICES}/missing"), &token, json!({ "a": 1 })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_merges_by_default_and_replaces_without_merge() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;
    let uri = "/api/v1/admin/collections/settings/documents/layout";

    let response = put_json_auth(app.clone(), uri, &token, json!({ "a": 1, "b": 2 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], "layout");

    let response = put_json_auth(app.clone(), uri, &token, json!({ "b": 3 })).await;
    let doc = body_json(response).await["data"].clone();
    assert_eq!(doc["a"], 1);
    assert_eq!(doc["b"], 3);

    let response = put_json_auth(app, &format!("{uri}?merge=false"), &token, json!({ "c": 4 })).await;
    let doc = body_json(response).await["data"].clone();
    assert_eq!(doc["a"], Value::Null);
    assert_eq!(doc["c"], 4);
}

#[tokio::test]
async fn internal_and_unknown_collections_are_rejected() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;

    let response = get_auth(
        app.clone(),
        "/api/v1/admin/collections/sessions/documents",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, "/api/v1/admin/collections/widgets/documents", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_document_is_404() {
    let app = common::build_test_app();
    let token = admin_token(app.clone()).await;
    let doc = add(app.clone(), &token, json!({ "title": "Temp" })).await;
    let uri = format!("{SERVICES}/{}", doc["id"].as_str().unwrap());

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
