//! Document template endpoint handlers.

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

use domain::models::notification::ActivityNotice;
use domain::models::template::{
    CreateTemplateRequest, DocumentTemplate, TemplateType, UpdateTemplateRequest,
};
use domain::services::documents::{generate_document, DEFAULT_ACCOUNT_NUMBER};
use persistence::repositories::{DocumentTemplateRepository, RegistrationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{audit_operation_error, record_activity};
use crate::services::CacheKey;

#[derive(Debug, Deserialize)]
pub struct TemplateListQuery {
    #[serde(rename = "type")]
    pub template_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDocumentRequest {
    pub registration_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GeneratedDocumentResponse {
    pub content: String,
    pub template_name: String,
}

/// List templates, default ones first.
///
/// GET /api/v1/templates?type=
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateListQuery>,
) -> Result<Json<JsonValue>, ApiError> {
    let type_filter = query
        .template_type
        .map(|raw| {
            raw.parse::<TemplateType>()
                .map(|t| t.to_string())
                .map_err(|_| ApiError::validation("Nieprawidłowy typ szablonu"))
        })
        .transpose()?;

    let key = CacheKey::Templates {
        template_type: type_filter.clone(),
    };
    if let Some(cached) = state.cache.get(&key) {
        return Ok(Json(cached));
    }

    let repository = DocumentTemplateRepository::new(state.pool.clone());
    let templates: Vec<DocumentTemplate> = repository
        .list(type_filter.as_deref())
        .await?
        .into_iter()
        .map(DocumentTemplate::from)
        .collect();

    let body = serde_json::to_value(&templates).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.cache.put(key, body.clone());
    Ok(Json(body))
}

/// Create a template. A new default displaces the old one atomically.
///
/// POST /api/v1/templates
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<DocumentTemplate>), ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = DocumentTemplateRepository::new(state.pool.clone());
    let template = DocumentTemplate::from(repository.create(&request).await.map_err(|e| {
        audit_operation_error(&state.pool, "database", "create_template", e.to_string());
        ApiError::from(e)
    })?);

    record_activity(&state.pool, ActivityNotice::template_created(&template.name)).await;
    state.cache.invalidate_templates();

    info!(template_id = %template.id, name = %template.name, "Template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// Update a template.
///
/// PUT /api/v1/templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<DocumentTemplate>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repository = DocumentTemplateRepository::new(state.pool.clone());
    let template = repository
        .update(id, &request)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "update_template", e.to_string());
            ApiError::from(e)
        })?
        .map(DocumentTemplate::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono szablonu".to_string()))?;

    record_activity(&state.pool, ActivityNotice::template_updated(&template.name)).await;
    state.cache.invalidate_templates();

    info!(template_id = %id, name = %template.name, "Template updated");
    Ok(Json(template))
}

/// Delete a template.
///
/// DELETE /api/v1/templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repository = DocumentTemplateRepository::new(state.pool.clone());
    let template = repository
        .delete(id)
        .await
        .map_err(|e| {
            audit_operation_error(&state.pool, "database", "delete_template", e.to_string());
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono szablonu".to_string()))?;

    record_activity(&state.pool, ActivityNotice::template_deleted(&template.name)).await;
    state.cache.invalidate_templates();

    info!(template_id = %id, name = %template.name, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Render a template for one registration.
///
/// POST /api/v1/templates/{id}/generate
pub async fn generate_from_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateDocumentRequest>,
) -> Result<Json<GeneratedDocumentResponse>, ApiError> {
    let templates = DocumentTemplateRepository::new(state.pool.clone());
    let template = templates
        .find_by_id(id)
        .await?
        .map(DocumentTemplate::from)
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono szablonu".to_string()))?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let registration = registrations
        .find_with_camp(request.registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Nie znaleziono zgłoszenia".to_string()))?
        .into();

    let configured = state.config.portal.bank_account_number.trim();
    let account_number = if configured.is_empty() {
        DEFAULT_ACCOUNT_NUMBER
    } else {
        configured
    };

    let content = generate_document(
        &template.content,
        &registration,
        account_number,
        Utc::now().date_naive(),
    );

    info!(
        template_id = %id,
        registration_id = %request.registration_id,
        "Document generated"
    );
    Ok(Json(GeneratedDocumentResponse {
        content,
        template_name: template.name,
    }))
}
