//! services/api/src/web/auth.rs
//!
//! Login form, credential check, and logout.

use axum::extract::{Form, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use annotation_study_core::domain::Identity;

use crate::config::ADMIN_USERNAME;
use crate::web::session::{clear_cookie, session_cookie, SessionUser};
use crate::web::state::AppState;
use crate::web::{found, pages};

/// One message for both unknown usernames and wrong passwords, so a login
/// probe cannot enumerate users.
const LOGIN_ERROR: &str = "Invalid credentials";

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET / - the login form.
pub async fn login_page_handler() -> Html<String> {
    Html(pages::login(None))
}

/// POST /login - checks the submitted credentials against the static
/// registry. The reserved admin username is matched against the configured
/// admin secret instead and gets the admin flag; participants get their
/// identity. Either way a fresh session token is issued.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.username == ADMIN_USERNAME && form.password == state.config.admin_secret {
        let token = state.sessions.issue(SessionUser::Admin).await;
        info!("Admin logged in");
        return (
            [(header::SET_COOKIE, session_cookie(&token))],
            found("/admin"),
        )
            .into_response();
    }

    match state.config.users.credentials.get(&form.username) {
        Some(password) if *password == form.password => {
            let identity = Identity(form.username);
            info!("User {} logged in", identity);
            let token = state
                .sessions
                .issue(SessionUser::Participant(identity))
                .await;
            (
                [(header::SET_COOKIE, session_cookie(&token))],
                found("/stage_select"),
            )
                .into_response()
        }
        _ => Html(pages::login(Some(LOGIN_ERROR))).into_response(),
    }
}

/// GET /logout - clears the session unconditionally and returns to the
/// login form.
pub async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    state.sessions.clear(&headers).await;
    ([(header::SET_COOKIE, clear_cookie())], found("/")).into_response()
}
