//! services/api/src/web/justification.rs
//!
//! The justification view: loads the user's justification dataset and
//! surfaces the sentences whose annotators disagree.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

use annotation_study_core::justify::label_conflicts;
use annotation_study_core::ports::PortError;

use crate::web::state::AppState;
use crate::web::{internal_error, pages, require_identity};

/// GET /justification - the label-conflict table. A user without a
/// justification dataset gets the placeholder page, same as entering the
/// stage directly.
pub async fn justification_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let identity = match require_identity(&state, &headers).await {
        Ok(identity) => identity,
        Err(redirect) => return redirect,
    };

    match state.paragraphs.load_justification(&identity).await {
        Ok(paragraphs) => {
            let conflicts = label_conflicts(&paragraphs);
            Html(pages::justification(identity.as_str(), &conflicts)).into_response()
        }
        Err(PortError::UnknownUser(_)) => Html(pages::not_yet_open()).into_response(),
        Err(e) => internal_error("Failed to load justification dataset", &e),
    }
}
