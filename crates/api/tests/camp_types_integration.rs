//! Integration tests for camp type description endpoints.
//!
//! Needs a running PostgreSQL instance, pointed at by TEST_DATABASE_URL:
//!
//!   TEST_DATABASE_URL=postgres://... cargo test --test camp_types_integration

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_admin_and_login, create_test_app, create_test_pool, get_request,
    json_request, json_request_with_auth, parse_response_body, run_migrations, test_config,
};
use serde_json::json;
use tower::ServiceExt;

/// Puts the seeded description row back so other tests see pristine content.
async fn restore_seeded_description(pool: &sqlx::PgPool, camp_type: &str) {
    let (label, description) = match camp_type {
        "hotelik" => (
            "Hotelik",
            "Kilkudniowy pobyt dla najmłodszych pod stałą opieką kadry.",
        ),
        "zlot" => (
            "Zlot",
            "Weekendowy zlot drużyn z całego hufca, pełen gier terenowych.",
        ),
        _ => (
            "Turnus",
            "Pełny turnus obozowy z programem harcerskim i wyprawami.",
        ),
    };

    sqlx::query("UPDATE camp_type_descriptions SET label = $1, description = $2 WHERE type = $3")
        .bind(label)
        .bind(description)
        .bind(camp_type)
        .execute(pool)
        .await
        .unwrap();
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_camp_types_public() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let response = app.oneshot(get_request("/api/v1/camp-types")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let types = body.as_array().unwrap();
    assert_eq!(types.len(), 3);

    // Alphabetical by type key
    assert_eq!(types[0]["type"], "hotelik");
    assert_eq!(types[1]["type"], "turnus");
    assert_eq!(types[2]["type"], "zlot");
    assert_eq!(types[0]["label"], "Hotelik");
    assert!(!types[0]["description"].as_str().unwrap().is_empty());

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_camp_type() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;

    let request = json_request_with_auth(
        Method::PUT,
        "/api/v1/camp-types/zlot",
        json!({
            "label": "Zlot hufca",
            "description": "Trzydniowy zlot wszystkich drużyn nad jeziorem."
        }),
        &auth.access_token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["type"], "zlot");
    assert_eq!(body["label"], "Zlot hufca");

    // Public listing reflects the edit
    let response = app.oneshot(get_request("/api/v1/camp-types")).await.unwrap();
    let body = parse_response_body(response).await;
    let zlot = body
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["type"] == "zlot")
        .unwrap()
        .clone();
    assert_eq!(zlot["label"], "Zlot hufca");

    restore_seeded_description(&pool, "zlot").await;
    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_camp_type_invalid_type() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;

    let request = json_request_with_auth(
        Method::PUT,
        "/api/v1/camp-types/kolonia",
        json!({
            "label": "Kolonia",
            "description": "Nieznany typ"
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Nieprawidłowy typ obozu");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_camp_type_requires_auth() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let request = json_request(
        Method::PUT,
        "/api/v1/camp-types/turnus",
        json!({
            "label": "Turnus",
            "description": "Opis"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    cleanup_all_test_data(&pool).await;
}
