//! Route definitions for the AgriAir platform

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    handlers,
    middleware::{admin_middleware, auth_middleware},
    AppState,
};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (register/login public, me protected)
        .nest("/auth", auth_routes(state.clone()))
        // Persisted advisories (public)
        .route("/advisories", get(handlers::list_advisories))
        // Protected routes - dashboard
        .nest("/dashboard", dashboard_routes(state.clone()))
        // Protected routes - crop management
        .nest("/crops", crop_routes(state.clone()))
        // Protected routes - pollution reports
        .nest("/reports", report_routes(state.clone()))
        // Protected routes - CSV export
        .nest("/export", export_routes(state.clone()))
        // Admin routes
        .nest("/admin", admin_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Dashboard routes (protected)
fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Crop routes (protected)
fn crop_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops).post(handlers::create_crop))
        .route(
            "/:crop_id",
            get(handlers::get_crop)
                .put(handlers::update_crop)
                .delete(handlers::delete_crop),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Pollution report routes (protected)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_my_reports).post(handlers::create_report))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Export routes (protected)
fn export_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/csv", get(handlers::export_csv))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Admin routes (admin role required)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/overview", get(handlers::get_overview))
        .route("/users", get(handlers::list_users))
        .route("/users/:user_id", delete(handlers::delete_user))
        .route("/reports", get(handlers::list_reports))
        .route("/reports/:report_id/status", put(handlers::update_report_status))
        .route("/advisories", post(handlers::create_advisory))
        .route("/advisories/:advisory_id", delete(handlers::delete_advisory))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
