//! Dashboard handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::dashboard::{Dashboard, DashboardService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// City to search; a match becomes the user's location
    pub city: Option<String>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<Dashboard>> {
    let service = DashboardService::new(state.db.clone(), &state.config);
    let dashboard = service
        .dashboard(current_user.0.user_id, query.city.as_deref())
        .await?;
    Ok(Json(dashboard))
}
