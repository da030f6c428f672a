//! Homepage content endpoint handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;

use domain::models::homepage::{
    HomepageImage, HomepageSection, HomepageSectionWithImages, UpdateHomepageSectionRequest,
};
use persistence::repositories::HomepageRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{audit_operation_error, public_file_url};
use crate::services::CacheKey;

/// Image row plus the URL the browser can fetch it from.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    #[serde(flatten)]
    pub image: HomepageImage,
    pub url: String,
}

async fn sections_with_images(
    repository: &HomepageRepository,
    include_hidden: bool,
) -> Result<Vec<HomepageSectionWithImages>, sqlx::Error> {
    let sections = repository.list_sections(include_hidden).await?;
    let mut result = Vec::with_capacity(sections.len());
    for section in sections {
        let homepage_images = repository
            .list_images_for_section(section.id)
            .await?
            .into_iter()
            .map(HomepageImage::from)
            .collect();
        result.push(HomepageSectionWithImages {
            section: HomepageSection::from(section),
            homepage_images,
        });
    }
    Ok(result)
}

/// List visible sections with their images, in display order.
///
/// GET /api/v1/homepage/sections
pub async fn list_sections(State(state): State<AppState>) -> Result<Json<JsonValue>, ApiError> {
    let key = CacheKey::HomepageSections {
        include_hidden: false,
    };
    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let repository = HomepageRepository::new(state.pool.clone());
    let sections = sections_with_images(&repository, false).await?;

    let body = serde_json::to_value(&sections).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(key, body.clone());
    Ok(Json(body))
}

/// List all sections, hidden ones included, for the settings view.
///
/// GET /api/v1/homepage/sections/all
pub async fn list_all_sections(State(state): State<AppState>) -> Result<Json<JsonValue>, ApiError> {
    let key = CacheKey::HomepageSections {
        include_hidden: true,
    };
    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let repository = HomepageRepository::new(state.pool.clone());
    let sections = sections_with_images(&repository, true).await?;

    let body = serde_json::to_value(&sections).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(key, body.clone());
    Ok(Json(body))
}

/// Update a section's text, content, order or visibility.
///
/// PUT /api/v1/homepage/sections/{id}
pub async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateHomepageSectionRequest>,
) -> Result<Json<HomepageSection>, ApiError> {
    if request.is_empty() {
        return Err(ApiError::validation("Brak danych do aktualizacji"));
    }

    let repository = HomepageRepository::new(state.pool.clone());
    let section = repository
        .update_section(id, &request)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "update_homepage_section", e.to_string());
            ApiError::from(e)
        })?
        .map(HomepageSection::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono sekcji".to_string()))?;

    state.cache.invalidate_homepage();

    info!(section_id = %id, section_type = %section.section_type, "Homepage section updated");
    Ok(Json(section))
}

/// Upload an image for a section.
///
/// POST /api/v1/homepage/sections/{id}/images
pub async fn upload_section_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImageResponse>), ApiError> {
    let repository = HomepageRepository::new(state.pool.clone());
    repository
        .find_section_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono sekcji".to_string()))?;

    let mut upload = None;
    let mut alt_text: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Nieprawidłowe dane formularza"))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::validation("Nieprawidłowe dane formularza"))?;
                upload = Some((content_type, data));
            }
            Some("alt_text") => {
                alt_text = field.text().await.ok().filter(|text| !text.is_empty());
            }
            _ => {}
        }
    }
    let (content_type, data) =
        upload.ok_or_else(|| ApiError::validation("Brak pliku w żądaniu"))?;

    let file_path = state
        .storage
        .save_homepage_image(id, &content_type, &data)
        .await?;

    let image = HomepageImage::from(
        repository
            .create_image(id, &file_path, alt_text.as_deref())
            .await
            .map_err(|e| {
                audit_operation_error(&state.pool, "database", "upload_homepage_image", e.to_string());
                ApiError::from(e)
            })?,
    );

    state.cache.invalidate_homepage();

    info!(section_id = %id, file_path = %image.file_path, "Homepage image uploaded");
    let url = public_file_url(&state.config.server.public_base_url, &image.file_path);
    Ok((StatusCode::CREATED, Json(ImageResponse { image, url })))
}

/// Delete an uploaded image.
///
/// DELETE /api/v1/homepage/images/{id}
pub async fn delete_section_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repository = HomepageRepository::new(state.pool.clone());
    let image = repository
        .find_image_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono obrazu".to_string()))?;

    // File first, row second, same as registration cards.
    state.storage.delete_file(&image.file_path).await?;
    repository.delete_image(id).await.map_err(|e| {
        audit_operation_error(&state.pool, "database", "delete_homepage_image", e.to_string());
        ApiError::from(e)
    })?;

    state.cache.invalidate_homepage();

    info!(image_id = %id, file_path = %image.file_path, "Homepage image deleted");
    Ok(StatusCode::NO_CONTENT)
}
