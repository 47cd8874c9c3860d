//! Health endpoint smoke test.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty};

#[tokio::test]
async fn health_reports_ok() {
    let app = common::build_test_app();

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["active_sessions"], 0);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn health_counts_active_sessions() {
    let app = common::build_test_app();

    post_empty(app.clone(), "/api/registration/sessions").await;
    post_empty(app.clone(), "/api/registration/sessions").await;

    let response = get(app, "/health").await;
    let json = body_json(response).await;
    assert_eq!(json["active_sessions"], 2);
}
