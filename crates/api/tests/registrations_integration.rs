//! Integration tests for registration endpoints: the public form and the
//! admin management operations.
//!
//! Needs a running PostgreSQL instance, pointed at by TEST_DATABASE_URL:
//!
//!   TEST_DATABASE_URL=postgres://... cargo test --test registrations_integration

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_admin_and_login, create_test_app, create_test_camp,
    create_test_pool, create_test_registration, delete_request_with_auth, get_request,
    get_request_with_auth, json_request, json_request_with_auth, parse_response_body,
    run_migrations, test_config, TestCamp, TestRegistration,
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

/// Fetches participant messages stored for a registration, newest first.
async fn stored_messages(pool: &sqlx::PgPool, registration_id: &str) -> Vec<(String, String)> {
    sqlx::query_as(
        r#"
        SELECT type, subject FROM notifications
        WHERE registration_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(Uuid::parse_str(registration_id).unwrap())
    .fetch_all(pool)
    .await
    .unwrap()
}

// ============================================================================
// Public Form Tests
// ============================================================================

#[tokio::test]
async fn test_create_registration_public() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;

    let registration = TestRegistration::new();
    // The form endpoint takes no auth header
    let request = json_request(
        Method::POST,
        "/api/v1/registrations",
        registration.payload(&camp.id),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(
        body["message"],
        "Zgłoszenie zostało wysłane pomyślnie! Sprawdź swoją skrzynkę email."
    );
    assert!(body["registration"].get("id").is_some());
    assert_eq!(body["registration"]["first_name"], registration.first_name);
    assert_eq!(body["registration"]["registration_status"], "pending");
    assert_eq!(body["registration"]["payment_status"], "pending");
    assert_eq!(body["registration"]["paid_amount"], 0.0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_registration_duplicate_pesel() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;

    let registration = TestRegistration::new();
    create_test_registration(&app, &camp.id, &registration).await;

    // Same participant, same camp
    let mut duplicate = registration.clone();
    duplicate.email = common::unique_test_email();
    let request = json_request(
        Method::POST,
        "/api/v1/registrations",
        duplicate.payload(&camp.id),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = parse_response_body(response).await;
    assert_eq!(
        body["message"],
        "Już istnieje zgłoszenie dla tego uczestnika na ten obóz"
    );

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_registration_unknown_camp() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let registration = TestRegistration::new();
    let request = json_request(
        Method::POST,
        "/api/v1/registrations",
        registration.payload(&Uuid::new_v4().to_string()),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Nie znaleziono obozu");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_registration_invalid_fields() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;

    let mut registration = TestRegistration::new();
    registration.pesel = "123".to_string();
    registration.postal_code = "00950".to_string();

    let request = json_request(
        Method::POST,
        "/api/v1/registrations",
        registration.payload(&camp.id),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Nieprawidłowe dane formularza");

    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    let fields: Vec<&str> = details.iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"pesel"));
    assert!(fields.contains(&"postal_code"));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_registration_participant_too_old() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;

    let mut registration = TestRegistration::new();
    registration.birth_date = chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

    let request = json_request(
        Method::POST,
        "/api/v1/registrations",
        registration.payload(&camp.id),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Uczestnik musi mieć między 7 a 21 lat");

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Admin Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_registrations_requires_auth() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let response = app
        .oneshot(get_request("/api/v1/registrations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_list_registrations_with_camp_filter() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let first_camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let second_camp = create_test_camp(&app, &auth, &TestCamp::new()).await;

    create_test_registration(&app, &first_camp.id, &TestRegistration::new()).await;
    create_test_registration(&app, &second_camp.id, &TestRegistration::new()).await;

    // Unfiltered listing sees both
    let request = get_request_with_auth("/api/v1/registrations", &auth.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    // Joined camp summary rides along
    assert!(body[0]["camp"].get("name").is_some());

    // Filtered listing sees one
    let uri = format!("/api/v1/registrations?camp_id={}", first_camp.id);
    let request = get_request_with_auth(&uri, &auth.access_token);
    let response = app.oneshot(request).await.unwrap();

    let body = parse_response_body(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["camp_id"], first_camp.id);
    assert_eq!(rows[0]["camp"]["name"], first_camp.name);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_get_registration() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration = TestRegistration::new();
    let registration_id = create_test_registration(&app, &camp.id, &registration).await;

    let uri = format!("/api/v1/registrations/{}", registration_id);
    let request = get_request_with_auth(&uri, &auth.access_token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"], registration_id);
    assert_eq!(body["pesel"], registration.pesel);
    assert_eq!(body["city"], registration.city);
    assert_eq!(body["registration_status"], "pending");
    assert_eq!(body["camp"]["name"], camp.name);
    assert_eq!(body["camp"]["price"], 1500.0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_get_registration_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;

    let uri = format!("/api/v1/registrations/{}", Uuid::new_v4());
    let request = get_request_with_auth(&uri, &auth.access_token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Nie znaleziono zgłoszenia");

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Admin Edit Tests
// ============================================================================

#[tokio::test]
async fn test_update_registration() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration = TestRegistration::new();
    let registration_id = create_test_registration(&app, &camp.id, &registration).await;

    // Full record payload: the admin form always sends every field
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/registrations/{}", registration_id),
        json!({
            "camp_id": camp.id,
            "first_name": "Janina",
            "last_name": registration.last_name,
            "pesel": registration.pesel,
            "birth_date": registration.birth_date,
            "email": registration.email,
            "phone": registration.phone,
            "address": registration.address,
            "city": registration.city,
            "postal_code": registration.postal_code,
            "zhp_status": "harcerka",
            "notes": null,
            "registration_status": "confirmed",
            "payment_status": "partial"
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["first_name"], "Janina");
    assert_eq!(body["zhp_status"], "harcerka");
    assert_eq!(body["registration_status"], "confirmed");
    assert_eq!(body["payment_status"], "partial");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_registration_invalid_pesel() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration = TestRegistration::new();
    let registration_id = create_test_registration(&app, &camp.id, &registration).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/registrations/{}", registration_id),
        json!({
            "camp_id": camp.id,
            "first_name": registration.first_name,
            "last_name": registration.last_name,
            "pesel": "abc",
            "birth_date": registration.birth_date,
            "email": registration.email,
            "phone": registration.phone,
            "address": registration.address,
            "city": registration.city,
            "postal_code": registration.postal_code,
            "zhp_status": null,
            "notes": null,
            "registration_status": "pending",
            "payment_status": "pending"
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "PESEL musi mieć 11 cyfr");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_delete_registration() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let uri = format!("/api/v1/registrations/{}", registration_id);
    let request = delete_request_with_auth(&uri, &auth.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = get_request_with_auth(&uri, &auth.access_token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Note Tests
// ============================================================================

#[tokio::test]
async fn test_add_note_prepends_newest_first() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let uri = format!("/api/v1/registrations/{}/notes", registration_id);

    let request = json_request_with_auth(
        Method::POST,
        &uri,
        json!({ "note": "Pierwsza notatka" }),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let notes = body["notes"].as_str().unwrap();
    // Timestamped line, e.g. `09.03.2025 14:05: Pierwsza notatka`
    assert!(notes.contains(": Pierwsza notatka\n"));

    let request = json_request_with_auth(
        Method::POST,
        &uri,
        json!({ "note": "Druga notatka" }),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let notes = body["notes"].as_str().unwrap().to_string();
    let second = notes.find("Druga notatka").unwrap();
    let first = notes.find("Pierwsza notatka").unwrap();
    assert!(second < first, "newest note should come first: {}", notes);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_add_note_empty() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/notes", registration_id),
        json!({ "note": "" }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Treść notatki nie może być pusta");

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Exclusion Tests
// ============================================================================

#[tokio::test]
async fn test_exclude_registration() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    // An earlier note proves exclusion replaces the field instead of appending
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/notes", registration_id),
        json!({ "note": "Kontakt telefoniczny" }),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/exclude", registration_id),
        json!({ "reason": "brak wpłaty" }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Uczestnik został wykluczony z obozu");
    assert_eq!(body["registration"]["registration_status"], "cancelled");
    assert_eq!(body["registration"]["notes"], "Wykluczono: brak wpłaty");

    // The participant got an exclusion message
    let messages = stored_messages(&pool, &registration_id).await;
    assert!(messages
        .iter()
        .any(|(t, subject)| t == "confirmation" && subject == "Wykluczenie z obozu"));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_exclude_registration_missing_reason() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/exclude", registration_id),
        json!({ "reason": "" }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Podaj powód wykluczenia");

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Payment Tests
// ============================================================================

#[tokio::test]
async fn test_record_payment_partial_then_completed() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    // Default test camp costs 1500
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let uri = format!("/api/v1/registrations/{}/payments", registration_id);

    let request = json_request_with_auth(
        Method::POST,
        &uri,
        json!({ "amount": 500.0 }),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Płatność została zarejestrowana");
    assert_eq!(body["paid_amount"], 500.0);
    assert_eq!(body["payment_display"], "Częściowo (500 / 1500 PLN)");
    assert_eq!(body["camp"]["price"], 1500.0);

    // Second payment settles the balance
    let request = json_request_with_auth(
        Method::POST,
        &uri,
        json!({ "amount": 1000.0 }),
        &auth.access_token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["paid_amount"], 1500.0);
    assert_eq!(body["payment_display"], "Opłacone");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_record_payment_rejects_zero_amount() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/payments", registration_id),
        json!({ "amount": 0.0 }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Wprowadź poprawną kwotę");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_record_payment_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/payments", Uuid::new_v4()),
        json!({ "amount": 100.0 }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

// ============================================================================
// Participant Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_payment_reminder() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/reminder", registration_id),
        json!({}),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Przypomnienie zostało wysłane");

    let messages = stored_messages(&pool, &registration_id).await;
    assert!(messages
        .iter()
        .any(|(t, subject)| t == "payment" && subject == "Przypomnienie o płatności"));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_send_custom_message() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/email", registration_id),
        json!({
            "subject": "Zbiórka przed wyjazdem",
            "content": "Spotykamy się w sobotę o 8:00 przed dworcem."
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Wiadomość została wysłana");

    let messages = stored_messages(&pool, &registration_id).await;
    assert!(messages
        .iter()
        .any(|(t, subject)| t == "custom" && subject == "Zbiórka przed wyjazdem"));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_send_custom_message_empty_subject() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let auth = create_admin_and_login(&app, &pool).await;
    let camp = create_test_camp(&app, &auth, &TestCamp::new()).await;
    let registration_id =
        create_test_registration(&app, &camp.id, &TestRegistration::new()).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/registrations/{}/email", registration_id),
        json!({
            "subject": "",
            "content": "Treść"
        }),
        &auth.access_token,
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Podaj temat wiadomości");

    cleanup_all_test_data(&pool).await;
}
