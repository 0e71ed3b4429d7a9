//! Authentication middleware
//!
//! JWT authentication and admin access control

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::{AppError, ErrorDetail, ErrorResponse};
use crate::services::{auth::decode_token, ProfileService};
use crate::AppState;

/// Authenticated user information extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: uuid::Uuid,
    pub username: String,
}

/// Validates the bearer token and attaches an `AuthUser` to the request
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        AppError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let claims = decode_token(bearer.token(), &state.config.jwt.secret)?;

    let user_id = uuid::Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Rejects non-admins with 403. Must run after `auth_middleware`.
///
/// The role is read from the profile on every request so a promotion or
/// demotion takes effect without issuing a new token.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.user_id)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let role = ProfileService::new(state.db.clone())
        .resolve_role(user_id)
        .await?;

    if !role.is_admin() {
        tracing::warn!(%user_id, "Non-admin attempted an admin action");
        return Err(AppError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new("UNAUTHORIZED", "Authentication required"),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
