//! Registration export endpoint handler.

use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::Response,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use domain::models::registration::RegistrationWithCamp;
use persistence::repositories::{CampRepository, RegistrationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_export_generated;
use crate::services::export::{build_workbook, export_file_name};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub camp_id: Option<Uuid>,
}

/// Export registrations to an XLSX download, optionally for one camp.
///
/// GET /api/v1/export/registrations?camp_id=
pub async fn export_registrations(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let camp_name = match query.camp_id {
        Some(camp_id) => {
            let camps = CampRepository::new(state.pool.clone());
            let camp = camps
                .find_by_id(camp_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Nie znaleziono obozu".to_string()))?;
            Some(camp.name)
        }
        None => None,
    };

    let repository = RegistrationRepository::new(state.pool.clone());
    let rows: Vec<RegistrationWithCamp> = repository
        .list_with_camp(query.camp_id)
        .await?
        .into_iter()
        .map(RegistrationWithCamp::from)
        .collect();

    let workbook = build_workbook(&rows)
        .map_err(|e| ApiError::Internal(format!("Nie udało się wygenerować pliku: {}", e)))?;
    record_export_generated();

    let file_name = export_file_name(camp_name.as_deref(), Utc::now().date_naive());
    info!(rows = rows.len(), file_name = %file_name, "Registrations exported");

    Response::builder()
        .header(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .header(header::CONTENT_LENGTH, workbook.len())
        .body(Body::from(workbook))
        .map_err(|_| ApiError::Internal("Failed to build response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_query_allows_missing_camp_filter() {
        let query: ExportQuery = serde_json::from_str("{}").unwrap();
        assert!(query.camp_id.is_none());
    }
}
