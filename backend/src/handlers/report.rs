//! HTTP handlers for pollution reports

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::report::CreateReportInput;
use crate::services::ReportService;
use crate::AppState;
use crate::models::PollutionReport;

/// File a pollution report
pub async fn create_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateReportInput>,
) -> AppResult<(StatusCode, Json<PollutionReport>)> {
    let service = ReportService::new(state.db);
    let report = service.create(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// The caller's own reports
pub async fn list_my_reports(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<PollutionReport>>> {
    let service = ReportService::new(state.db);
    Ok(Json(service.list_for_user(current_user.0.user_id).await?))
}
