//! Admin handlers. Routed behind `admin_middleware`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::admin::AdminOverview;
use crate::services::{AdminService, ReportService};
use crate::AppState;
use crate::models::{Pagination, PollutionReport, Role, User};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn get_overview(State(state): State<AppState>) -> AppResult<Json<AdminOverview>> {
    let service = AdminService::new(state.db);
    Ok(Json(service.overview().await?))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<User>>> {
    let service = AdminService::new(state.db);
    Ok(Json(service.list_users(&pagination).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = AdminService::new(state.db);
    service
        .delete_user(current_user.0.user_id, Role::Admin, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_reports(State(state): State<AppState>) -> AppResult<Json<Vec<PollutionReport>>> {
    let service = ReportService::new(state.db);
    Ok(Json(service.list_all(None).await?))
}

pub async fn update_report_status(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<PollutionReport>> {
    let service = ReportService::new(state.db);
    Ok(Json(service.set_status(report_id, &body.status).await?))
}
