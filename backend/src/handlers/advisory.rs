//! HTTP handlers for persisted advisories

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::advisory::CreateAdvisoryInput;
use crate::services::AdvisoryService;
use crate::AppState;
use crate::models::Advisory;

/// Public list, newest first
pub async fn list_advisories(State(state): State<AppState>) -> AppResult<Json<Vec<Advisory>>> {
    let service = AdvisoryService::new(state.db);
    Ok(Json(service.list(None).await?))
}

/// Publish an advisory (admin)
pub async fn create_advisory(
    State(state): State<AppState>,
    Json(input): Json<CreateAdvisoryInput>,
) -> AppResult<(StatusCode, Json<Advisory>)> {
    let service = AdvisoryService::new(state.db);
    let advisory = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(advisory)))
}

/// Remove an advisory (admin)
pub async fn delete_advisory(
    State(state): State<AppState>,
    Path(advisory_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = AdvisoryService::new(state.db);
    service.delete(advisory_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
