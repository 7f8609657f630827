//! services/api/src/web/admin.rs
//!
//! The admin console: completion dashboard, raw store export, and the
//! destructive reset operations. Everything here is gated on the admin
//! flag and answers 403 to anyone else.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use annotation_study_core::domain::{CompletionRow, Identity};
use annotation_study_core::ports::PortError;

use crate::web::state::AppState;
use crate::web::{found, internal_error, pages, require_admin};

/// GET /admin - per-user completion counts across every configured user.
///
/// Each user's store and dataset are read independently; a missing store
/// counts zero and an unloadable dataset shows an unknown total, so one
/// bad user never breaks aggregation for the rest.
pub async fn dashboard_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Err(forbidden) = require_admin(&state, &headers).await {
        return forbidden;
    }

    let mut rows = Vec::new();
    for user in state.config.users.credentials.keys() {
        let identity = Identity(user.clone());
        let completed = match state.progress.current_position(&identity).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Could not read store for {}: {}", identity, e);
                0
            }
        };
        let total = state
            .paragraphs
            .load_paragraphs(&identity)
            .await
            .ok()
            .map(|paragraphs| paragraphs.len());
        let done = total.map(|t| completed >= t).unwrap_or(false);
        rows.push(CompletionRow {
            user: user.clone(),
            completed,
            total,
            done,
        });
    }

    Html(pages::admin_dashboard(&rows)).into_response()
}

/// GET /download_db/{username} - the raw bytes of one user's store.
pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> Response {
    if let Err(forbidden) = require_admin(&state, &headers).await {
        return forbidden;
    }
    let Some(identity) = known_identity(&state, &username) else {
        return unknown_user(&username);
    };

    match state.progress.export(&identity).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}.db\"", identity),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(PortError::StoreNotFound(_)) => store_not_found(&username),
        Err(e) => internal_error("Failed to export store", &e),
    }
}

/// GET /admin/reset_user/{username} - deletes one user's store. Deleting
/// an already-absent store reports not-found rather than failing.
pub async fn reset_user_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> Response {
    if let Err(forbidden) = require_admin(&state, &headers).await {
        return forbidden;
    }
    let Some(identity) = known_identity(&state, &username) else {
        return unknown_user(&username);
    };

    match state.progress.reset(&identity).await {
        Ok(()) => {
            info!("Reset store for {}", identity);
            found("/admin")
        }
        Err(PortError::StoreNotFound(_)) => store_not_found(&username),
        Err(e) => internal_error("Failed to reset store", &e),
    }
}

/// GET /admin/reset_all - deletes every configured user's store. Absent
/// stores are skipped; the operation is idempotent.
pub async fn reset_all_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Err(forbidden) = require_admin(&state, &headers).await {
        return forbidden;
    }

    for user in state.config.users.credentials.keys() {
        let identity = Identity(user.clone());
        match state.progress.reset(&identity).await {
            Ok(()) => info!("Reset store for {}", identity),
            Err(PortError::StoreNotFound(_)) => {}
            Err(e) => warn!("Could not reset store for {}: {}", identity, e),
        }
    }

    found("/admin")
}

fn known_identity(state: &AppState, username: &str) -> Option<Identity> {
    state
        .config
        .users
        .credentials
        .contains_key(username)
        .then(|| Identity(username.to_string()))
}

fn unknown_user(username: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("unknown user: {}", username) })),
    )
        .into_response()
}

fn store_not_found(username: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("no store for user: {}", username) })),
    )
        .into_response()
}
