//! HTTP handlers for crop endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::crop::{CreateCropInput, UpdateCropInput};
use crate::services::dashboard::CropDetail;
use crate::services::{CropService, DashboardService, KnowledgeService};
use crate::AppState;
use crate::models::Crop;

#[derive(Debug, Deserialize)]
pub struct CropListQuery {
    /// Case-insensitive name fragment
    pub q: Option<String>,
}

/// List the caller's crops
pub async fn list_crops(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<CropListQuery>,
) -> AppResult<Json<Vec<Crop>>> {
    let service = CropService::new(state.db);
    let crops = service
        .list_for_user(current_user.0.user_id, query.q.as_deref())
        .await?;
    Ok(Json(crops))
}

/// Log a crop; its agronomic profile is resolved from the name
pub async fn create_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCropInput>,
) -> AppResult<(StatusCode, Json<Crop>)> {
    input.check()?;

    let profile = KnowledgeService::new(&state.config)
        .resolve(input.name.trim())
        .await;

    let crop = CropService::new(state.db)
        .create(current_user.0.user_id, input, profile)
        .await?;
    Ok((StatusCode::CREATED, Json(crop)))
}

/// A crop with suggestions for the caller's location
pub async fn get_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(crop_id): Path<Uuid>,
) -> AppResult<Json<CropDetail>> {
    let service = DashboardService::new(state.db.clone(), &state.config);
    let detail = service.crop_detail(current_user.0.user_id, crop_id).await?;
    Ok(Json(detail))
}

pub async fn update_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(crop_id): Path<Uuid>,
    Json(input): Json<UpdateCropInput>,
) -> AppResult<Json<Crop>> {
    let service = CropService::new(state.db);
    let crop = service
        .update(current_user.0.user_id, crop_id, input)
        .await?;
    Ok(Json(crop))
}

pub async fn delete_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(crop_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CropService::new(state.db);
    service.delete(current_user.0.user_id, crop_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
