pub mod admin;
pub mod auth;
pub mod justification;
pub mod pages;
pub mod reader;
pub mod session;
pub mod stages;
pub mod state;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::error;

use annotation_study_core::domain::Identity;
use annotation_study_core::ports::PortError;

use crate::web::session::SessionUser;
use crate::web::state::AppState;

/// Builds the full application router over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(auth::login_page_handler))
        .route("/login", post(auth::login_handler))
        .route("/logout", get(auth::logout_handler))
        .route("/stage_select", get(stages::stage_select_handler))
        .route("/go_to_stage", get(stages::go_to_stage_handler))
        .route("/reader", get(reader::reader_handler))
        .route("/confirm", post(reader::confirm_handler))
        .route("/justification", get(justification::justification_handler))
        .route("/admin", get(admin::dashboard_handler))
        .route("/download_db/{username}", get(admin::download_handler))
        .route("/admin/reset_user/{username}", get(admin::reset_user_handler))
        .route("/admin/reset_all", get(admin::reset_all_handler))
        .with_state(state)
}

/// A 302 redirect; the whole surface uses Found, not See Other.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Resolves the request session to a participant identity, or the redirect
/// to the login page. A missing identity is control flow, not an error.
pub(crate) async fn require_identity(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> Result<Identity, Response> {
    match state.sessions.resolve(headers).await {
        Some(SessionUser::Participant(identity)) => Ok(identity),
        _ => Err(found("/")),
    }
}

/// Admin-only routes answer 403 to everyone else, no redirect.
pub(crate) async fn require_admin(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> Result<(), Response> {
    match state.sessions.resolve(headers).await {
        Some(SessionUser::Admin) => Ok(()),
        _ => Err(StatusCode::FORBIDDEN.into_response()),
    }
}

/// Maps a port failure to the generic 500 answer. The specifics go to the
/// log, never to the client.
pub(crate) fn internal_error(context: &str, err: &PortError) -> Response {
    error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong".to_string(),
    )
        .into_response()
}
