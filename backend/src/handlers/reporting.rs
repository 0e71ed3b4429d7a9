//! CSV export handler

use axum::{extract::State, http::header, response::IntoResponse};
use chrono::Utc;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reporting::EXPORT_FILENAME;
use crate::services::{AdvisoryService, DashboardService, ReportingService};
use crate::AppState;

/// Download persisted advisories plus today's weather at the default location
pub async fn export_csv(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let advisories = AdvisoryService::new(state.db.clone()).list(None).await?;
    let weather = DashboardService::new(state.db.clone(), &state.config)
        .default_snapshot()
        .await;

    let csv = ReportingService::export_to_csv(&advisories, &weather, Utc::now().date_naive())?;
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
