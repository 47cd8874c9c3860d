//! HTTP-level integration tests for the static catalog endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

/// All nine roles are listed with display copy and capabilities.
#[tokio::test]
async fn roles_are_listed_with_capabilities() {
    let app = common::build_test_app();

    let response = get(app, "/api/catalog/roles").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let roles = json["data"].as_array().unwrap();
    assert_eq!(roles.len(), 9);

    let candidate = roles
        .iter()
        .find(|r| r["role"] == "candidate")
        .expect("candidate role listed");
    assert_eq!(candidate["is_free"], true);
    assert_eq!(candidate["category"], "candidate");
    assert_eq!(candidate["capabilities"]["can_apply_to_jobs"], true);
    assert!(!candidate["label"].as_str().unwrap().is_empty());

    let pos_admin = roles
        .iter()
        .find(|r| r["role"] == "pos_admin")
        .expect("pos_admin role listed");
    assert_eq!(pos_admin["is_free"], false);
    assert_eq!(pos_admin["capabilities"]["can_manage_pos"], true);
}

/// A paying role gets its ordered plan list with prices and features.
#[tokio::test]
async fn plans_for_paying_role() {
    let app = common::build_test_app();

    let response = get(app, "/api/catalog/plans?role=pos_admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let plans = json["data"].as_array().unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0]["id"], "pos-starter");
    assert_eq!(plans[1]["id"], "pos-pro");
    assert_eq!(plans[0]["price_monthly"], 29.90);
    assert!(plans[0]["features"].as_array().unwrap().len() >= 3);
}

/// Free roles have no plans.
#[tokio::test]
async fn plans_for_free_role_is_empty() {
    let app = common::build_test_app();

    for role in ["candidate", "individual"] {
        let response = get(app.clone(), &format!("/api/catalog/plans?role={role}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["data"].as_array().unwrap().is_empty(), "role {role}");
    }
}

/// Unknown roles fail query deserialization.
#[tokio::test]
async fn plans_for_unknown_role_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/catalog/plans?role=superuser").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
