//! Registration endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::notification::{ActivityNotice, ParticipantMessage};
use domain::models::registration::{
    exclusion_note, prepend_note, AddNoteRequest, CreateRegistrationRequest,
    ExcludeRegistrationRequest, RecordPaymentRequest, Registration, RegistrationWithCamp,
    SendMessageRequest, UpdateRegistrationRequest,
};
use persistence::repositories::{CampRepository, NotificationRepository, RegistrationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_registration_submitted;
use crate::routes::{audit_operation_error, record_activity};
use crate::services::CacheKey;

#[derive(Debug, Deserialize)]
pub struct RegistrationListQuery {
    pub camp_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationMessageResponse {
    pub message: String,
    pub registration: Registration,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub message: String,
    #[serde(flatten)]
    pub registration: RegistrationWithCamp,
    /// Derived display status, e.g. `Częściowo (500 / 1500 PLN)`.
    pub payment_display: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Submit a registration from the public form.
///
/// POST /api/v1/registrations
pub async fn create_registration(
    State(state): State<AppState>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationMessageResponse>), ApiError> {
    request.validate().map_err(ApiError::from)?;

    let camps = CampRepository::new(state.pool.clone());
    let camp = camps
        .find_by_id(request.camp_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono obozu".to_string()))?;

    let repository = RegistrationRepository::new(state.pool.clone());
    let registration = Registration::from(repository.create(&request).await.map_err(|e| {
        audit_operation_error(&state.pool, "database", "create_registration", e.to_string());
        ApiError::from(e)
    })?);

    record_registration_submitted(&camp.camp_type);
    state.cache.invalidate_registrations();

    info!(
        registration_id = %registration.id,
        camp_id = %camp.id,
        "Registration submitted"
    );
    Ok((
        StatusCode::CREATED,
        Json(RegistrationMessageResponse {
            message: "Zgłoszenie zostało wysłane pomyślnie! Sprawdź swoją skrzynkę email."
                .to_string(),
            registration,
        }),
    ))
}

/// List registrations joined with their camp, newest first.
///
/// GET /api/v1/registrations?camp_id=
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<RegistrationListQuery>,
) -> Result<Json<JsonValue>, ApiError> {
    let key = CacheKey::Registrations {
        camp_id: query.camp_id,
    };
    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let repository = RegistrationRepository::new(state.pool.clone());
    let registrations: Vec<RegistrationWithCamp> = repository
        .list_with_camp(query.camp_id)
        .await?
        .into_iter()
        .map(RegistrationWithCamp::from)
        .collect();

    let body =
        serde_json::to_value(&registrations).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(key, body.clone());
    Ok(Json(body))
}

/// Get a single registration joined with its camp.
///
/// GET /api/v1/registrations/{id}
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationWithCamp>, ApiError> {
    let repository = RegistrationRepository::new(state.pool.clone());
    let registration = repository
        .find_with_camp(id)
        .await?
        .map(RegistrationWithCamp::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    Ok(Json(registration))
}

/// Update a registration's contact fields and statuses.
///
/// PUT /api/v1/registrations/{id}
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRegistrationRequest>,
) -> Result<Json<Registration>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = RegistrationRepository::new(state.pool.clone());
    let registration = repository
        .update(id, &request)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "update_registration", e.to_string());
            ApiError::from(e)
        })?
        .map(Registration::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    record_activity(
        &state.pool,
        ActivityNotice::registration_updated(&registration.participant_name()),
    )
    .await;
    state.cache.invalidate_registrations();

    info!(registration_id = %id, "Registration updated");
    Ok(Json(registration))
}

/// Delete a registration.
///
/// DELETE /api/v1/registrations/{id}
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repository = RegistrationRepository::new(state.pool.clone());
    let registration = repository
        .delete(id)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "delete_registration", e.to_string());
            ApiError::from(e)
        })?
        .map(Registration::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    record_activity(
        &state.pool,
        ActivityNotice::registration_deleted(&registration.participant_name()),
    )
    .await;
    state.cache.invalidate_registrations();

    info!(registration_id = %id, "Registration deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Prepend a timestamped note to a registration.
///
/// POST /api/v1/registrations/{id}/notes
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddNoteRequest>,
) -> Result<Json<Registration>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = RegistrationRepository::new(state.pool.clone());
    let existing = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    let notes = prepend_note(existing.notes.as_deref(), &request.note, Utc::now());
    let registration = repository
        .set_notes(id, &notes)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "add_note", e.to_string());
            ApiError::from(e)
        })?
        .map(Registration::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    record_activity(&state.pool, ActivityNotice::note_added()).await;
    state.cache.invalidate_registrations();

    info!(registration_id = %id, "Note added");
    Ok(Json(registration))
}

/// Exclude a participant: cancel the registration and notify them.
///
/// POST /api/v1/registrations/{id}/exclude
pub async fn exclude_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExcludeRegistrationRequest>,
) -> Result<Json<RegistrationMessageResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = RegistrationRepository::new(state.pool.clone());
    let registration = repository
        .exclude(id, &exclusion_note(&request.reason))
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "exclude_registration", e.to_string());
            ApiError::from(e)
        })?
        .map(Registration::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    let notifications = NotificationRepository::new(state.pool.clone());
    notifications
        .record_message(id, &ParticipantMessage::exclusion(&request.reason))
        .await?;
    record_activity(&state.pool, ActivityNotice::participant_excluded()).await;
    state.cache.invalidate_registrations();

    info!(registration_id = %id, reason = %request.reason, "Participant excluded");
    Ok(Json(RegistrationMessageResponse {
        message: "Uczestnik został wykluczony z obozu".to_string(),
        registration,
    }))
}

/// Record a payment against a registration.
///
/// POST /api/v1/registrations/{id}/payments
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = RegistrationRepository::new(state.pool.clone());
    repository
        .add_payment(id, request.amount)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "record_payment", e.to_string());
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    let registration = repository
        .find_with_camp(id)
        .await?
        .map(RegistrationWithCamp::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    state.cache.invalidate_registrations();

    let payment_display = registration.payment_display();
    info!(
        registration_id = %id,
        amount = request.amount,
        paid_amount = registration.registration.paid_amount,
        "Payment recorded"
    );
    Ok(Json(PaymentResponse {
        message: "Płatność została zarejestrowana".to_string(),
        registration,
        payment_display,
    }))
}

/// Record a payment reminder for a participant.
///
/// POST /api/v1/registrations/{id}/reminder
pub async fn send_payment_reminder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repository = RegistrationRepository::new(state.pool.clone());
    let registration = repository
        .find_with_camp(id)
        .await?
        .map(RegistrationWithCamp::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    let notifications = NotificationRepository::new(state.pool.clone());
    notifications
        .record_message(
            id,
            &ParticipantMessage::payment_reminder(&registration.camp.name, registration.camp.price),
        )
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "send_payment_reminder", e.to_string());
            ApiError::from(e)
        })?;
    record_activity(
        &state.pool,
        ActivityNotice::reminder_sent(&registration.registration.participant_name()),
    )
    .await;

    info!(registration_id = %id, "Payment reminder recorded");
    Ok(Json(MessageResponse {
        message: "Przypomnienie zostało wysłane".to_string(),
    }))
}

/// Record a custom message to a participant.
///
/// POST /api/v1/registrations/{id}/email
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = RegistrationRepository::new(state.pool.clone());
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    let notifications = NotificationRepository::new(state.pool.clone());
    notifications
        .record_message(
            id,
            &ParticipantMessage::custom(&request.subject, &request.content),
        )
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "send_message", e.to_string());
            ApiError::from(e)
        })?;
    record_activity(&state.pool, ActivityNotice::message_sent()).await;

    info!(registration_id = %id, "Message recorded");
    Ok(Json(MessageResponse {
        message: "Wiadomość została wysłana".to_string(),
    }))
}
