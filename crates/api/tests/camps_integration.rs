//! Integration tests for camp management endpoints.
//!
//! Needs a running PostgreSQL instance, pointed at by TEST_DATABASE_URL:
//!
//!   TEST_DATABASE_URL=postgres://... cargo test --test camps_integration

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration as ChronoDuration, Utc};
use common::{
    cleanup_all_test_data, create_admin_and_login, create_test_app, create_test_camp,
    create_test_pool, create_test_registration, delete_request_with_auth, get_request,
    json_request, json_request_with_auth, parse_response_body, run_migrations, test_config,
    TestCamp, TestRegistration,
};
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Public Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_camps_public() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;

    // Two camps with different start dates
    let later = TestCamp::new();
    let mut sooner = TestCamp::new();
    sooner.start_date = Utc::now().date_naive() + ChronoDuration::days(10);
    sooner.end_date = sooner.start_date + ChronoDuration::days(14);

    create_test_camp(&app, &auth, &later).await;
    create_test_camp(&app, &auth, &sooner).await;

    // No auth header needed for the public listing
    let response = app.oneshot(get_request("/api/v1/camps")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let camps = body.as_array().unwrap();
    assert_eq!(camps.len(), 2);
    // Soonest start date first
    assert_eq!(camps[0]["name"], sooner.name);
    assert_eq!(camps[1]["name"], later.name);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_get_camp_public() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();
    let created = create_test_camp(&app, &auth, &camp).await;

    let uri = format!("/api/v1/camps/{}", created.id);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"], created.id);
    assert_eq!(body["name"], camp.name);
    assert_eq!(body["type"], "turnus");
    assert_eq!(body["location"], camp.location);
    assert_eq!(body["price"], camp.price);
    assert_eq!(body["capacity"], camp.capacity);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_get_camp_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let uri = format!("/api/v1/camps/{}", uuid::Uuid::new_v4());
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Nie znaleziono obozu");

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Camp Creation Tests
// ============================================================================

#[tokio::test]
async fn test_create_camp_success() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new().with_type("zlot").with_price(890.0);

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/camps",
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": camp.start_date,
            "end_date": camp.end_date,
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert!(body.get("id").is_some());
    assert_eq!(body["name"], camp.name);
    assert_eq!(body["type"], "zlot");
    assert_eq!(body["price"], 890.0);
    assert_eq!(body["capacity"], camp.capacity);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_camp_requires_auth() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let camp = TestCamp::new();
    let request = json_request(
        Method::POST,
        "/api/v1/camps",
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": camp.start_date,
            "end_date": camp.end_date,
            "price": camp.price,
            "capacity": camp.capacity
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_camp_end_before_start() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/camps",
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": camp.start_date,
            "end_date": camp.start_date - ChronoDuration::days(1),
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(
        body["message"],
        "Data zakończenia musi być późniejsza niż data rozpoczęcia"
    );

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_camp_past_start_date() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();
    let yesterday = Utc::now().date_naive() - ChronoDuration::days(1);

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/camps",
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": yesterday,
            "end_date": yesterday + ChronoDuration::days(14),
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Data rozpoczęcia musi być w przyszłości");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_camp_short_name() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/camps",
        json!({
            "name": "Obóz",
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": camp.start_date,
            "end_date": camp.end_date,
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Nazwa musi mieć minimum 5 znaków");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_camp_blank_location_uses_default() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/camps",
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": "   ",
            "start_date": camp.start_date,
            "end_date": camp.end_date,
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["location"], "Stanica Harcerska ZHP");

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Camp Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_camp() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();
    let created = create_test_camp(&app, &auth, &camp).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/camps/{}", created.id),
        json!({
            "name": "Obóz nad morzem",
            "type": "hotelik",
            "location": camp.location,
            "start_date": camp.start_date,
            "end_date": camp.end_date,
            "price": 1999.0,
            "capacity": 25
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"], created.id);
    assert_eq!(body["name"], "Obóz nad morzem");
    assert_eq!(body["type"], "hotelik");
    assert_eq!(body["price"], 1999.0);
    assert_eq!(body["capacity"], 25);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_camp_allows_past_start_date() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();
    let created = create_test_camp(&app, &auth, &camp).await;

    // A camp already in progress keeps its original start date
    let past_start = Utc::now().date_naive() - ChronoDuration::days(3);
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/camps/{}", created.id),
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": past_start,
            "end_date": past_start + ChronoDuration::days(14),
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_camp_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = TestCamp::new();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/camps/{}", uuid::Uuid::new_v4()),
        json!({
            "name": camp.name,
            "type": camp.camp_type,
            "location": camp.location,
            "start_date": camp.start_date,
            "end_date": camp.end_date,
            "price": camp.price,
            "capacity": camp.capacity
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Camp Deletion Tests
// ============================================================================

#[tokio::test]
async fn test_delete_camp_cascades_registrations() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let created = create_test_camp(&app, &auth, &TestCamp::new()).await;
    create_test_registration(&app, &created.id, &TestRegistration::new()).await;

    let request = delete_request_with_auth(
        &format!("/api/v1/camps/{}", created.id),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The camp is gone
    let uri = format!("/api/v1/camps/{}", created.id);
    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And its registrations went with it
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE camp_id = $1")
        .bind(uuid::Uuid::parse_str(&created.id).unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_delete_camp_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;

    let request = delete_request_with_auth(
        &format!("/api/v1/camps/{}", uuid::Uuid::new_v4()),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Response Cache Tests
// ============================================================================

#[tokio::test]
async fn test_camp_list_cache_invalidated_by_writes() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let mut config = test_config();
    config.cache.enabled = true;
    // One app instance throughout: router clones share the cache
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    create_test_camp(&app, &auth, &TestCamp::new()).await;

    // Prime the cache
    let response = app.clone().oneshot(get_request("/api/v1/camps")).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // A row inserted behind the API's back is invisible while the cache holds
    let camp = TestCamp::new();
    sqlx::query(
        r#"
        INSERT INTO camps (name, type, location, start_date, end_date, price, capacity)
        VALUES ($1, 'turnus', $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&camp.name)
    .bind(&camp.location)
    .bind(camp.start_date)
    .bind(camp.end_date)
    .bind(camp.price)
    .bind(camp.capacity)
    .execute(&pool)
    .await
    .unwrap();

    let response = app.clone().oneshot(get_request("/api/v1/camps")).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1, "stale cache still served");

    // A write through the API drops the cached listing
    create_test_camp(&app, &auth, &TestCamp::new()).await;

    let response = app.clone().oneshot(get_request("/api/v1/camps")).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    cleanup_all_test_data(&pool).await;
}
