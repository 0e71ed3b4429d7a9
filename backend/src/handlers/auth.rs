//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthTokens, RegisterInput};
use crate::services::{AuthService, ProfileService};
use crate::AppState;
use crate::models::Role;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Register endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<AuthTokens>)> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.register(body).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthTokens>> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.login(&body.username, &body.password).await?;
    Ok(Json(tokens))
}

/// Current account and role; creates the profile if it is missing
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<MeResponse>> {
    let user = current_user.0;
    let role = ProfileService::new(state.db)
        .ensure_profile(user.user_id)
        .await?;

    Ok(Json(MeResponse {
        user_id: user.user_id,
        username: user.username,
        role,
    }))
}
