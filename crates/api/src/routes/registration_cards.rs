//! Registration card upload endpoint handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use domain::models::notification::ActivityNotice;
use domain::models::RegistrationCard;
use domain::services::documents::{registration_card_data, RegistrationCardData};
use persistence::repositories::{RegistrationCardRepository, RegistrationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AdminAuth;
use crate::routes::{audit_operation_error, public_file_url, record_activity};

/// Card tracking row plus the URL the browser can fetch the file from.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    #[serde(flatten)]
    pub card: RegistrationCard,
    pub url: String,
}

/// Upload a registration card PDF.
///
/// POST /api/v1/registrations/{id}/card
pub async fn upload_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AdminAuth>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CardResponse>), ApiError> {
    let registrations = RegistrationRepository::new(state.pool.clone());
    registrations
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Nieprawidłowe dane formularza"))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("karta.pdf").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| ApiError::validation("Nieprawidłowe dane formularza"))?;
            upload = Some((file_name, content_type, data));
        }
    }
    let (file_name, content_type, data) =
        upload.ok_or_else(|| ApiError::validation("Brak pliku w żądaniu"))?;

    let file_path = state
        .storage
        .save_registration_card(id, &file_name, &content_type, &data)
        .await?;

    // The original kept uploaded files around when the tracking insert
    // failed, so a failure here deliberately leaves the file in place.
    let cards = RegistrationCardRepository::new(state.pool.clone());
    let card = RegistrationCard::from(
        cards
            .create(
                id,
                &file_name,
                &file_path,
                &content_type,
                data.len() as i64,
                Some(auth.admin_id),
            )
            .await
            .map_err(|e| {
                audit_operation_error(&state.pool, "database", "upload_card", e.to_string());
                ApiError::from(e)
            })?,
    );

    record_activity(&state.pool, ActivityNotice::card_uploaded()).await;

    info!(
        registration_id = %id,
        file_name = %card.file_name,
        size_bytes = card.size_bytes,
        "Registration card uploaded"
    );
    let url = public_file_url(&state.config.server.public_base_url, &card.file_path);
    Ok((StatusCode::CREATED, Json(CardResponse { card, url })))
}

/// Get the newest card uploaded for a registration.
///
/// GET /api/v1/registrations/{id}/card
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CardResponse>, ApiError> {
    let cards = RegistrationCardRepository::new(state.pool.clone());
    let card = cards
        .find_latest_for_registration(id)
        .await?
        .map(RegistrationCard::from)
        .ok_or_else(|| ApiError::NotFound("Brak karty zgłoszeniowej".to_string()))?;

    let url = public_file_url(&state.config.server.public_base_url, &card.file_path);
    Ok(Json(CardResponse { card, url }))
}

/// Delete the newest card uploaded for a registration.
///
/// DELETE /api/v1/registrations/{id}/card
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let cards = RegistrationCardRepository::new(state.pool.clone());
    let card = cards
        .find_latest_for_registration(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Brak karty zgłoszeniowej".to_string()))?;

    // File first, row second: a dangling row can be retried, a dangling
    // file could not be reached again once the row is gone.
    state.storage.delete_file(&card.file_path).await?;
    cards.delete(card.id).await.map_err(|e| {
        audit_operation_error(&state.pool, "database", "delete_card", e.to_string());
        ApiError::from(e)
    })?;

    record_activity(&state.pool, ActivityNotice::card_deleted()).await;

    info!(registration_id = %id, file_name = %card.file_name, "Registration card deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Data for rendering a registration card document in the browser.
///
/// GET /api/v1/registrations/{id}/card-data
pub async fn get_card_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationCardData>, ApiError> {
    let registrations = RegistrationRepository::new(state.pool.clone());
    let registration = registrations
        .find_with_camp(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?;

    Ok(Json(registration_card_data(&registration.into())))
}
