//! services/api/src/web/reader.rs
//!
//! The reading flow endpoints: render the current paragraph, record a
//! confirmation.

use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

use annotation_study_core::domain::ReaderView;

use crate::web::state::AppState;
use crate::web::{found, internal_error, pages, require_identity};

/// GET /reader - the current paragraph, or the done-state once the dataset
/// is exhausted.
pub async fn reader_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(redirect) => return redirect,
    };

    match state.flow.render(&identity).await {
        Ok(ReaderView::InProgress(payload)) => Html(pages::reader(&payload)).into_response(),
        Ok(ReaderView::Complete) => Html(pages::reader_done()).into_response(),
        Err(e) => internal_error("Failed to render reader", &e),
    }
}

#[derive(Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub selection: Option<String>,
    /// Seconds spent on the paragraph, submitted as text by the form.
    #[serde(default)]
    pub duration: Option<String>,
}

/// POST /confirm - appends one progress entry and bounces back to the
/// reader, which advances automatically because position is derived from
/// the row count. Past the end this writes nothing.
pub async fn confirm_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(redirect) => return redirect,
    };

    let selection = form.selection.filter(|s| !s.is_empty());
    let duration = form.duration.as_deref().and_then(|d| d.parse::<f64>().ok());

    // Serialize count-then-insert per user; a double-submit must advance
    // once, not append the same index twice.
    let lock = state.confirm_lock(&identity).await;
    let _guard = lock.lock().await;

    match state.flow.confirm(&identity, selection, duration).await {
        Ok(()) => found("/reader"),
        Err(e) => internal_error("Failed to record confirmation", &e),
    }
}
